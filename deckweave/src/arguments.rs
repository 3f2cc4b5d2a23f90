use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Path to the deck HTML document to augment
    pub deck: PathBuf,

    /// URL of the roadmap fragment document
    #[arg(short = 'u', long)]
    pub fragment_url: String,

    /// Where to write the augmented deck
    #[arg(short, long, default_value = "deck.out.html")]
    pub output: PathBuf,

    /// HTTP timeout for the fragment fetch, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Fixed seed for the particle draw, for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the splice summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress banner and non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_invocation() {
        let args = Args::try_parse_from([
            "deckweave",
            "deck.html",
            "--fragment-url",
            "https://example.com/roadmap.html",
        ])
        .unwrap();

        assert_eq!(args.deck, PathBuf::from("deck.html"));
        assert_eq!(args.output, PathBuf::from("deck.out.html"));
        assert_eq!(args.timeout, 10);
        assert_eq!(args.seed, None);
        assert!(!args.json);
    }

    #[test]
    fn fragment_url_is_required() {
        assert!(Args::try_parse_from(["deckweave", "deck.html"]).is_err());
    }

    #[test]
    fn accepts_seed_and_output_overrides() {
        let args = Args::try_parse_from([
            "deckweave",
            "deck.html",
            "-u",
            "http://localhost/roadmap.html",
            "-o",
            "out.html",
            "--seed",
            "7",
            "--json",
            "-q",
        ])
        .unwrap();

        assert_eq!(args.output, PathBuf::from("out.html"));
        assert_eq!(args.seed, Some(7));
        assert!(args.json);
        assert!(args.quiet);
    }
}

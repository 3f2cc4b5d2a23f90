pub mod assemble;
pub mod decor;
pub mod nav;
pub mod page;
pub mod pipeline;
pub mod styles;

use colored::Colorize;

pub fn print_banner() {
    println!();
    println!(
        "  {} {}",
        "deckweave".cyan().bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!(
        "  {}",
        "build-time augmentation for static slide decks".dimmed()
    );
    println!();
}

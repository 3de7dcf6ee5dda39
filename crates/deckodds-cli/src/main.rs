use clap::{Parser, Subcommand};
use deckodds_core::cards::{Card, CardFilter, Color, Deck, Hand, Rank, Suit};
use deckodds_core::enumeration::compute_discard_probabilities;
use deckodds_core::hypergeometric::match_probability_for;
use deckodds_core::{build_discard_table, detect_hand_categories};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deckodds")]
#[command(about = "Exact draw and discard odds for a standard deck", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chance of drawing at least MIN cards matching the filter
    Odds {
        /// Cards to draw
        #[arg(short, long)]
        draw: usize,

        /// Minimum number of matching cards
        #[arg(short, long, default_value_t = 1)]
        min: usize,

        #[arg(long)]
        rank: Option<Rank>,

        #[arg(long)]
        suit: Option<Suit>,

        #[arg(long)]
        color: Option<Color>,

        /// Cards already out of the deck, e.g. Ah,10d
        #[arg(long, value_delimiter = ',')]
        removed: Vec<Card>,
    },

    /// List the hand categories present in the given cards
    Detect {
        #[arg(value_delimiter = ',', required = true)]
        cards: Vec<Card>,
    },

    /// Category odds after discarding cards from a hand
    Hands {
        /// Held cards, e.g. Ah,Kh,Qh,Jh,2c,3d,7s,9s
        #[arg(long, value_delimiter = ',', required = true)]
        hand: Vec<Card>,

        /// Held cards to throw away (at most 5)
        #[arg(long, value_delimiter = ',')]
        discard: Vec<Card>,
    },

    /// Discard probability table for the cards left in the deck
    Table {
        /// Cards already out of the deck
        #[arg(long, value_delimiter = ',')]
        removed: Vec<Card>,

        /// Discard sizes to tabulate
        #[arg(short, long, value_delimiter = ',', default_value = "1,2,3,4,5")]
        n: Vec<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Odds {
            draw,
            min,
            rank,
            suit,
            color,
            removed,
        } => {
            let deck = remaining_deck(&removed)?;
            let filter = CardFilter { rank, suit, color };
            let p = match_probability_for(&deck, &filter, draw, min)?;
            println!(
                "P(at least {} of {} matching in {} draws from {} cards) = {:.2}%",
                min,
                deck.count_matching(&filter),
                draw,
                deck.len(),
                p * 100.0
            );
        }
        Command::Detect { cards } => {
            let names: Vec<String> = detect_hand_categories(&cards)
                .iter()
                .map(|tag| tag.to_string())
                .collect();
            println!("{}", names.join(", "));
        }
        Command::Hands { hand, discard } => {
            let standard = Deck::standard();
            let held = resolve(&standard, &hand)?;
            let thrown = resolve(&Deck::new(held.clone()), &discard)?;

            let hand = Hand::new(held);
            let ids: Vec<u32> = thrown.iter().map(|c| c.id).collect();
            let selection = hand.select(&ids)?;
            let deck = standard.without(hand.cards());

            let odds = compute_discard_probabilities(&hand, &selection, &deck)?;
            for (tag, p) in odds.iter() {
                println!("{:<16} {:>7.2}%", tag.to_string(), p * 100.0);
            }
        }
        Command::Table { removed, n } => {
            let deck = remaining_deck(&removed)?;
            let header: Vec<String> = n.iter().map(|n| format!("N={n}")).collect();
            println!("{:<10} {:>5}  {}", "Card", "Left", header.join("  "));
            for row in build_discard_table(deck.cards(), &n)? {
                let cells: Vec<String> = row
                    .probabilities
                    .iter()
                    .map(|p| format!("{:>6.2}%", p * 100.0))
                    .collect();
                println!(
                    "{:<10} {:>5}  {}",
                    row.label,
                    row.matching_cards,
                    cells.join(" ")
                );
            }
        }
    }
    Ok(())
}

/// Map parsed cards onto actual cards of `deck`, matching rank and suit and
/// using each deck card at most once.
fn resolve(deck: &Deck, wanted: &[Card]) -> Result<Vec<Card>, String> {
    let mut pool = deck.cards().to_vec();
    wanted
        .iter()
        .map(|w| {
            let pos = pool
                .iter()
                .position(|c| c.rank == w.rank && c.suit == w.suit)
                .ok_or_else(|| format!("{w} is not available"))?;
            Ok(pool.remove(pos))
        })
        .collect()
}

/// The standard deck minus `removed`.
fn remaining_deck(removed: &[Card]) -> Result<Deck, String> {
    let standard = Deck::standard();
    let removed = resolve(&standard, removed)?;
    Ok(standard.without(&removed))
}

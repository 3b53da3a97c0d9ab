//! Golf Score entry point
//!
//! Native builds get a small command line scorecard backed by files. The
//! browser build starts from `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::{Parser, Subcommand};

    use golf_score::export::EXPORT_FILE_NAME;
    use golf_score::{FileStorage, RoundConfig, RoundView, ScoreStore, Settings, mail_draft};

    /// Environment variable naming the data directory
    const DATA_DIR_ENV: &str = "GOLF_SCORE_DIR";
    const DEFAULT_DATA_DIR: &str = ".golf-score";

    #[derive(Parser, Debug)]
    #[command(name = "golf-score", about = "Keep score for a round of golf")]
    struct Cli {
        /// Where the round and settings are stored
        #[arg(long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
        #[command(subcommand)]
        command: Option<Command>,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Print the selected player's card
        Show,
        /// Add strokes to a hole (1-based); negative removes strokes
        Add {
            hole: usize,
            #[arg(allow_hyphen_values = true)]
            delta: i64,
        },
        /// Switch to a player (1-based)
        Select {
            #[arg(allow_hyphen_values = true)]
            player: i64,
        },
        /// Zero every score and keep the configuration
        NewRound {
            /// Skip the confirmation requirement
            #[arg(long)]
            yes: bool,
        },
        /// Change hole count, player count and names
        Configure {
            /// Hole count (current value when omitted)
            #[arg(long)]
            holes: Option<i64>,
            /// Player count (current value when omitted)
            #[arg(long)]
            players: Option<i64>,
            /// Player name, repeat once per player; unnamed slots keep their names
            #[arg(long = "name")]
            names: Vec<String>,
        },
        /// Print the scorecard table, write it to a file, or build a mail link
        Export {
            /// Build a mailto: link for this address (or the saved one)
            #[arg(long, num_args = 0..=1, default_missing_value = "", conflicts_with = "out")]
            mail: Option<String>,
            /// Write the table to a file instead of stdout
            #[arg(long)]
            out: Option<PathBuf>,
        },
        /// View or change preferences
        Settings {
            #[arg(long)]
            recipient: Option<String>,
            #[arg(long)]
            confirm_new_round: Option<bool>,
            /// Forget saved preferences
            #[arg(long, conflicts_with_all = ["recipient", "confirm_new_round"])]
            reset: bool,
        },
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let mut store = ScoreStore::load(FileStorage::new(&cli.data_dir));
        log::debug!("Using data directory {}", store.storage().dir().display());
        let mut settings = Settings::load(store.storage());

        match cli.command.unwrap_or(Command::Show) {
            Command::Show => print_card(&store),
            Command::Add { hole, delta } => {
                let index = hole.checked_sub(1).context("holes are numbered from 1")?;
                match store.adjust_score(index, delta) {
                    Some(strokes) => println!("Hole {hole}: {strokes}"),
                    None => bail!(
                        "hole {hole} is not on this card (1-{})",
                        store.state().num_holes
                    ),
                }
                println!("Total: {}", store.current_total());
            }
            Command::Select { player } => {
                let selection = store.select_player(player.saturating_sub(1));
                println!("Now scoring for {} (player {})", selection.name, selection.index + 1);
            }
            Command::NewRound { yes } => {
                if settings.confirm_new_round && !yes {
                    bail!("starting a new round erases every score; pass --yes to confirm");
                }
                store.reset_round();
                println!("New round started");
            }
            Command::Configure {
                holes,
                players,
                names,
            } => {
                let config = RoundConfig::of(store.state()).merged(holes, players, names.as_slice());
                store.apply_config(config);
                print_card(&store);
            }
            Command::Export { mail, out } => {
                if let Some(recipient) = mail {
                    let recipient = match recipient.trim() {
                        "" => settings.export_recipient.clone().unwrap_or_default(),
                        given => given.to_string(),
                    };
                    println!("{}", mail_draft(&recipient, store.state())?);
                } else if let Some(path) = out {
                    let path = if path.is_dir() {
                        path.join(EXPORT_FILE_NAME)
                    } else {
                        path
                    };
                    std::fs::write(&path, store.export_text())
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {}", path.display());
                } else {
                    print!("{}", store.export_text());
                }
            }
            Command::Settings {
                recipient,
                confirm_new_round,
                reset,
            } => {
                if reset {
                    Settings::clear(store.storage_mut()).context("clearing settings")?;
                    settings = Settings::default();
                }
                let changed = recipient.is_some() || confirm_new_round.is_some();
                if let Some(recipient) = recipient {
                    settings.set_export_recipient(&recipient);
                }
                if let Some(confirm) = confirm_new_round {
                    settings.confirm_new_round = confirm;
                }
                if changed {
                    settings
                        .save(store.storage_mut())
                        .context("saving settings")?;
                }
                println!(
                    "recipient: {}",
                    settings.export_recipient.as_deref().unwrap_or("(none)")
                );
                println!("confirm new round: {}", settings.confirm_new_round);
            }
        }

        Ok(())
    }

    fn print_card(store: &ScoreStore<FileStorage>) {
        let view = RoundView::of(store.state());
        println!(
            "{} (player {} of {})",
            view.player_name,
            view.current_player + 1,
            view.player_names.len()
        );
        for hole in &view.holes {
            println!("  {:>2}: {}", hole.number, hole.strokes);
        }
        println!("Total: {}", view.total);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use tango::{
    AzureTranslator, MachineTranslator, MockMode, MockTranslator, NewWord, TranslationGateway,
    TranslatorConfig, WordEntry, WordStore,
};

fn cli() -> Command {
    Command::new("tango")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate words and manage the flashcard word list")
        .arg(
            Arg::new("database")
                .long("database")
                .short('d')
                .env("TANGO_DATABASE")
                .help("SQLite database file")
                .default_value("words.db")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("translate")
                .about("Translate text, optionally saving the pair")
                .arg(Arg::new("text").help("Text to translate").required(true))
                .arg(
                    Arg::new("source")
                        .long("source")
                        .short('s')
                        .help("Source language code (default: detected)"),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .help("Target language code or 'auto' (default: ja/en pair)"),
                )
                .arg(
                    Arg::new("save")
                        .long("save")
                        .help("Store the translated pair")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("mock")
                        .long("mock")
                        .short('m')
                        .help("Use mock translator instead of Azure Translator")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list").about("List every saved word"))
        .subcommand(Command::new("random").about("Show a random word, unknown words first"))
        .subcommand(
            Command::new("known")
                .about("Mark a word as known or unknown")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("known")
                        .required(true)
                        .value_parser(value_parser!(bool)),
                ),
        )
        .subcommand(
            Command::new("delete").about("Delete a word").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

fn print_word(word: &WordEntry) {
    println!(
        "[{}] {} ({}) → {} ({}) {}",
        word.id,
        word.source_text,
        word.source_lang,
        word.translated_text,
        word.target_lang,
        if word.known { "✓" } else { "✗" }
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&cli().get_matches()).await
}

/// Execute one parsed command
///
/// The word store is opened only by commands that read or write it, so a
/// plain `translate` never creates the database file.
async fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = matches
        .get_one::<PathBuf>("database")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("words.db"));
    let open_store = || WordStore::open(&db_path);

    match matches.subcommand() {
        Some(("translate", args)) => {
            let text = args.get_one::<String>("text").map(String::as_str).unwrap_or_default();
            let source = args.get_one::<String>("source").map(String::as_str);
            let target = args.get_one::<String>("target").map(String::as_str);

            let translator: Arc<dyn MachineTranslator> = if args.get_flag("mock") {
                Arc::new(MockTranslator::new(MockMode::Suffix))
            } else {
                match TranslatorConfig::from_env() {
                    Ok(config) => Arc::new(AzureTranslator::new(config)?),
                    Err(e) => {
                        eprintln!("❌ {}", e);
                        eprintln!("   Set them in the environment or a .env file");
                        eprintln!("   Or use --mock to use mock translator");
                        return Err(e.into());
                    }
                }
            };

            let gateway = TranslationGateway::new(translator);
            let translation = gateway.translate(text, source, target).await?;
            println!(
                "🌍 {} → {}",
                translation.source_language, translation.target_language
            );
            println!("{}", translation.translated_text);

            if args.get_flag("save") {
                let id = open_store()?.create(&NewWord {
                    source_text: text.to_string(),
                    translated_text: translation.translated_text,
                    source_lang: translation.source_language,
                    target_lang: translation.target_language,
                })?;
                println!("✅ Saved as #{}", id);
            }
        }
        Some(("list", _)) => {
            for word in open_store()?.list_all()? {
                print_word(&word);
            }
        }
        Some(("random", _)) => print_word(&open_store()?.pick_weighted()?),
        Some(("known", args)) => {
            let id = *args.get_one::<i64>("id").ok_or("missing id")?;
            let known = *args.get_one::<bool>("known").ok_or("missing flag")?;
            if !open_store()?.update_known(id, known)? {
                eprintln!("⚠️  No word with id {}", id);
            }
        }
        Some(("delete", args)) => {
            let id = *args.get_one::<i64>("id").ok_or("missing id")?;
            if !open_store()?.delete(id)? {
                eprintln!("⚠️  No word with id {}", id);
            }
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn test_parse_known_subcommand() {
        let matches = cli()
            .try_get_matches_from(["tango", "known", "3", "true"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "known");
        assert_eq!(args.get_one::<i64>("id"), Some(&3));
        assert_eq!(args.get_one::<bool>("known"), Some(&true));
    }

    #[test]
    fn test_parse_translate_flags() {
        let matches = cli()
            .try_get_matches_from(["tango", "translate", "猫", "--target", "auto", "--save", "--mock"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<String>("text").map(String::as_str), Some("猫"));
        assert_eq!(args.get_one::<String>("target").map(String::as_str), Some("auto"));
        assert!(args.get_flag("save"));
        assert!(args.get_flag("mock"));
        assert_eq!(args.get_one::<String>("source"), None);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(cli().try_get_matches_from(["tango"]).is_err());
    }

    fn temp_db_path() -> PathBuf {
        std::env::temp_dir().join(format!("tango-cli-{}.db", uuid::Uuid::new_v4()))
    }

    fn remove_db(path: &PathBuf) {
        for suffix in ["", "-wal", "-shm"] {
            let mut name = path.clone().into_os_string();
            name.push(suffix);
            let _ = std::fs::remove_file(name);
        }
    }

    #[tokio::test]
    async fn test_translate_without_save_leaves_no_database() {
        let path = temp_db_path();
        let db = path.to_string_lossy().into_owned();

        let matches = cli()
            .try_get_matches_from(["tango", "--database", &db, "translate", "hello", "--mock"])
            .unwrap();
        run(&matches).await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_translate_with_save_creates_database() {
        let path = temp_db_path();
        let db = path.to_string_lossy().into_owned();

        let matches = cli()
            .try_get_matches_from([
                "tango", "--database", &db, "translate", "hello", "--mock", "--save",
            ])
            .unwrap();
        run(&matches).await.unwrap();

        assert!(path.exists());
        let words = WordStore::open(&path).unwrap().list_all().unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].source_text, "hello");

        remove_db(&path);
    }
}

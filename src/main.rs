use anyhow::{bail, Result};
use notefind::notes::{hub_listing, list_notes, RecentNotes};
use notefind::utils::{self, underline};
use notefind::{Config, Editor, Match, Query};
use std::path::PathBuf;

const HELP: &str = "\
notefind - search and navigate inside plain-text notes

USAGE:
  notefind find <FILE> <QUERY> [OPTIONS]
  notefind list [DIR] [--recent <PATH>]... [--config <PATH>]

FIND OPTIONS:
  -c, --case-sensitive    Match letter case exactly
  -w, --whole-word        Only match whole words
      --no-wrap           Do not wrap around at the end of the note
      --prev              Search backwards
      --caret <N>         Start from character offset N (default: 0)
      --steps <N>         Number of matches to step through (default: 1)
      --all               Print every match instead of navigating
      --config <PATH>     Read defaults from a JSON config file

LIST OPTIONS:
      --recent <PATH>     Recently opened note, most recent first (repeatable)
      --config <PATH>     Read notes_dir and max_recent_files from a JSON config file

GLOBAL OPTIONS:
      --debug             Enable debug logging
  -h, --help              Print help
  -V, --version           Print version
";

struct FindArgs {
    file: PathBuf,
    query: String,
    case_sensitive: bool,
    whole_word: bool,
    no_wrap: bool,
    backwards: bool,
    caret: usize,
    steps: usize,
    all: bool,
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }
    if args.contains(["-V", "--version"]) {
        println!("notefind {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // 初始化日誌
    utils::init_logger(args.contains("--debug"));

    match args.subcommand()?.as_deref() {
        Some("find") => {
            let find = FindArgs {
                case_sensitive: args.contains(["-c", "--case-sensitive"]),
                whole_word: args.contains(["-w", "--whole-word"]),
                no_wrap: args.contains("--no-wrap"),
                backwards: args.contains("--prev"),
                all: args.contains("--all"),
                caret: args.opt_value_from_str("--caret")?.unwrap_or(0),
                steps: args.opt_value_from_str("--steps")?.unwrap_or(1),
                config: args.opt_value_from_str("--config")?,
                file: args.free_from_str()?,
                query: args.free_from_str()?,
            };
            reject_leftovers(args)?;
            run_find(find)
        }
        Some("list") => {
            let recent: Vec<PathBuf> = args.values_from_str("--recent")?;
            let config: Option<PathBuf> = args.opt_value_from_str("--config")?;
            let dir: Option<PathBuf> = args.opt_free_from_str()?;
            reject_leftovers(args)?;
            run_list(dir, recent, config)
        }
        Some(other) => bail!("Unknown command: {}\n\n{}", other, HELP),
        None => {
            print!("{}", HELP);
            Ok(())
        }
    }
}

fn reject_leftovers(args: pico_args::Arguments) -> Result<()> {
    let remaining = args.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {:?}", remaining);
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn run_find(args: FindArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;

    // 命令列開關只能打開選項，關閉則沿用配置
    let query = Query::new(args.query)
        .case_sensitive(args.case_sensitive || config.search.case_sensitive)
        .whole_word(args.whole_word || config.search.whole_word);
    let wrap = config.search.wrap && !args.no_wrap;

    if query.is_empty() {
        bail!("Search text must not be empty");
    }

    // find 只讀取；不存在的路徑不能當成新筆記
    if !args.file.is_file() {
        bail!("File not found: {}", args.file.display());
    }

    let mut editor = Editor::new(Some(args.file.as_path()))?;
    let highlight = editor.search(query)?;
    println!("{}", highlight);

    if args.all {
        for (idx, &m) in editor.matches().iter().enumerate() {
            print_match(&editor, idx, m);
        }
        return Ok(());
    }

    editor.set_caret(args.caret);
    for _ in 0..args.steps {
        let found = if args.backwards {
            editor.find_previous(wrap)?
        } else {
            editor.find_next(wrap)?
        };

        match found {
            Some(m) => {
                let idx = editor.highlight().current.unwrap_or(0);
                print_match(&editor, idx, m);
            }
            None => {
                if highlight.total > 0 {
                    println!("{}", editor.message().unwrap_or("No more matches"));
                }
                break;
            }
        }
    }

    Ok(())
}

fn print_match(editor: &Editor, idx: usize, m: Match) {
    let total = editor.matches().len();
    let (row, col) = editor.position_of(m.start);
    let line = editor.document().line_content(row);
    let prefix = format!("{}/{} {}:{}: ", idx + 1, total, row + 1, col + 1);

    println!("{}{}", prefix, line);
    println!("{}{}", " ".repeat(prefix.len()), underline(&line, col, m.len));
}

fn run_list(dir: Option<PathBuf>, recent: Vec<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_ref())?;
    let Some(dir) = dir.or(config.notes_dir) else {
        bail!("No notes directory given and none configured");
    };
    let recent = RecentNotes::from_paths(recent, config.max_recent_files);

    for path in hub_listing(&recent, &list_notes(&dir)) {
        println!("{}", path.display());
    }
    Ok(())
}

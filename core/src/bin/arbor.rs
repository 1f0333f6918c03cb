use std::io;
use std::path::PathBuf;

use arbor::console::{default_bracket_file, Console, LineEditor, Scripted, Settings};
use clap::{crate_authors, crate_description, crate_version, App, Arg};

fn main() -> Result<(), failure::Error> {
    env_logger::init();

    let matches = App::new("arbor")
        .about(crate_description!())
        .version(crate_version!())
        .author(crate_authors!())
        .arg(
            Arg::with_name("FILE")
                .short("f")
                .long("file")
                .takes_value(true)
                .help("Sets the file the bracket notation is read from"),
        )
        .arg(
            Arg::with_name("EXPR")
                .short("e")
                .long("expr")
                .takes_value(true)
                .help("Builds the binary tree from this bracket notation on startup"),
        )
        .arg(
            Arg::with_name("batch")
                .short("b")
                .long("batch")
                .help("Reads commands from stdin without line editing"),
        )
        .get_matches();

    let settings = Settings {
        bracket_file: matches
            .value_of("FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_bracket_file),
        expression: matches.value_of("EXPR").map(str::to_owned),
    };
    log::info!("bracket file: {}", settings.bracket_file.display());

    let stdout = io::stdout();
    let out = stdout.lock();
    if matches.is_present("batch") {
        let stdin = io::stdin();
        let input = Scripted::new(stdin.lock());
        let mut console = Console::new(input, out, settings);
        console.run()?;
    } else {
        let mut console = Console::new(LineEditor::new(), out, settings);
        console.run()?;
    }
    Ok(())
}

//! Menu driven console around a [`BinaryTree`] and an [`RBTree`].

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use failure::Error;
use itertools::Itertools;
use rustyline::error::ReadlineError;

use crate::datastruct::{BinaryTree, RBTree};

pub const DEFAULT_BRACKET_FILE: &str = "bracket_tree.txt";

const SEPARATOR: &str = "------------------------------------------------------------";

const MAIN_COMMANDS: &str = "\
1) binary tree
2) red-black tree
c) list commands
e) exit";

const BINARY_COMMANDS: &str = "\
1) enter bracket notation
2) read bracket notation from file
3) post-order traversal
r) change bracket file path
h) show bracket file path
s) show binary tree
c) list commands
<) back to main menu";

const RBTREE_COMMANDS: &str = "\
1) build from the binary tree
2) pre-order traversal
3) in-order traversal
4) post-order traversal
5) breadth-first traversal
6) search a value
7) delete a value
8) insert a value
s) show red-black tree
c) list commands
<) back to main menu";

#[derive(Debug, Fail)]
pub enum ConsoleError {
    #[fail(display = "could not read '{}': {}", path, err)]
    ReadFile {
        path: String,
        #[cause]
        err: io::Error,
    },
    #[fail(display = "'{}' holds no bracket notation", path)]
    EmptyFile { path: String },
    #[fail(display = "could not read input: {}", reason)]
    Input { reason: String },
}

#[derive(Clone, Debug)]
pub struct Settings {
    /// File read by the "read from file" command.
    pub bracket_file: PathBuf,
    /// Bracket notation loaded before the first command.
    pub expression: Option<String>,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            bracket_file: default_bracket_file(),
            expression: None,
        }
    }
}

/// `bracket_tree.txt` in the working directory, or in the home directory
/// when the working directory is unavailable.
pub fn default_bracket_file() -> PathBuf {
    env::current_dir()
        .ok()
        .or_else(dirs::home_dir)
        .unwrap_or_default()
        .join(DEFAULT_BRACKET_FILE)
}

/// Returns the first line of `path`.
pub fn read_bracket_file(path: &Path) -> Result<String, ConsoleError> {
    let content = fs::read_to_string(path).map_err(|err| ConsoleError::ReadFile {
        path: path.display().to_string(),
        err,
    })?;
    content
        .lines()
        .next()
        .map(str::to_owned)
        .ok_or_else(|| ConsoleError::EmptyFile {
            path: path.display().to_string(),
        })
}

pub trait Prompt {
    /// Reads one line without its terminator. `Ok(None)` ends the session.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError>;
}

/// Interactive input with history and line editing.
pub struct LineEditor {
    editor: rustyline::Editor<()>,
}

impl LineEditor {
    pub fn new() -> LineEditor {
        LineEditor {
            editor: rustyline::Editor::<()>::new(),
        }
    }
}

impl Default for LineEditor {
    fn default() -> LineEditor {
        LineEditor::new()
    }
}

impl Prompt for LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(ConsoleError::Input {
                reason: e.to_string(),
            }),
        }
    }
}

/// Plain line reader for piped input and tests. Prompts are not echoed.
pub struct Scripted<R> {
    input: R,
}

impl<R: BufRead> Scripted<R> {
    pub fn new(input: R) -> Scripted<R> {
        Scripted { input }
    }
}

impl<R: BufRead> Prompt for Scripted<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, ConsoleError> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_owned())),
            Err(e) => Err(ConsoleError::Input {
                reason: e.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Menu {
    Main,
    Binary,
    RedBlack,
}

pub struct Console<P, W> {
    prompt: P,
    out: W,
    settings: Settings,
    binary: BinaryTree,
    rbtree: RBTree<i64>,
    menu: Menu,
}

impl<P, W> Console<P, W>
where
    P: Prompt,
    W: Write,
{
    pub fn new(prompt: P, out: W, settings: Settings) -> Console<P, W> {
        Console {
            prompt,
            out,
            settings,
            binary: BinaryTree::new(),
            rbtree: RBTree::new(),
            menu: Menu::Main,
        }
    }

    pub fn binary_tree(&self) -> &BinaryTree {
        &self.binary
    }

    pub fn rbtree(&self) -> &RBTree<i64> {
        &self.rbtree
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs commands until `e` is entered in the main menu or input ends.
    pub fn run(&mut self) -> Result<(), Error> {
        if let Some(text) = self.settings.expression.clone() {
            self.load_notation(&text)?;
        }
        self.print_commands()?;
        loop {
            writeln!(self.out, "{}", SEPARATOR)?;
            self.out.flush()?;
            let line = match self.prompt.read_line("command: ")? {
                Some(line) => line,
                None => break,
            };
            let command = line.trim();
            info!("command '{}' in {:?} menu", command, self.menu);
            let keep_going = match self.menu {
                Menu::Main => self.main_command(command)?,
                Menu::Binary => self.binary_command(command).map(|_| true)?,
                Menu::RedBlack => self.rbtree_command(command).map(|_| true)?,
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.out, "session closed")?;
        self.out.flush()?;
        Ok(())
    }

    fn print_commands(&mut self) -> io::Result<()> {
        let commands = match self.menu {
            Menu::Main => MAIN_COMMANDS,
            Menu::Binary => BINARY_COMMANDS,
            Menu::RedBlack => RBTREE_COMMANDS,
        };
        writeln!(self.out, "{}", commands)
    }

    fn enter(&mut self, menu: Menu) -> io::Result<()> {
        self.menu = menu;
        self.print_commands()
    }

    fn unknown_command(&mut self, command: &str) -> io::Result<()> {
        writeln!(self.out, "unknown command '{}', try again ('c' lists commands)", command)
    }

    fn main_command(&mut self, command: &str) -> Result<bool, Error> {
        match command {
            "e" => return Ok(false),
            "c" => self.print_commands()?,
            "1" => self.enter(Menu::Binary)?,
            "2" => self.enter(Menu::RedBlack)?,
            _ => self.unknown_command(command)?,
        }
        Ok(true)
    }

    fn binary_command(&mut self, command: &str) -> Result<(), Error> {
        match command {
            "1" => {
                if let Some(text) = self.prompt.read_line("bracket notation: ")? {
                    self.load_notation(&text)?;
                }
            }
            "2" => self.load_file()?,
            "3" => {
                let values = self.binary.post_order();
                self.write_values("post-order", &values)?;
            }
            "r" => {
                if let Some(path) = self.prompt.read_line("bracket file path: ")? {
                    self.settings.bracket_file = PathBuf::from(path.trim());
                    writeln!(
                        self.out,
                        "bracket file is now {}",
                        self.settings.bracket_file.display()
                    )?;
                }
            }
            "h" => writeln!(
                self.out,
                "bracket file: {}",
                self.settings.bracket_file.display()
            )?,
            "s" => {
                if self.binary.is_empty() {
                    writeln!(self.out, "tree is empty")?;
                } else {
                    write!(self.out, "{}", self.binary.render())?;
                }
            }
            "c" => self.print_commands()?,
            "<" => self.enter(Menu::Main)?,
            _ => self.unknown_command(command)?,
        }
        Ok(())
    }

    fn rbtree_command(&mut self, command: &str) -> Result<(), Error> {
        match command {
            "1" => {
                if self.binary.is_empty() {
                    writeln!(self.out, "binary tree is empty, nothing to build from")?;
                } else {
                    self.rbtree.build_tree(&self.binary.post_order());
                    writeln!(self.out, "red-black tree built with {} nodes", self.rbtree.len())?;
                }
            }
            "2" => {
                let values = self.rbtree.pre_order();
                self.write_values("pre-order", &values)?;
            }
            "3" => {
                let values = self.rbtree.in_order();
                self.write_values("in-order", &values)?;
            }
            "4" => {
                let values = self.rbtree.post_order();
                self.write_values("post-order", &values)?;
            }
            "5" => {
                let values = self.rbtree.breadth_first();
                self.write_values("breadth-first", &values)?;
            }
            "6" => {
                if let Some(value) = self.read_value()? {
                    if self.rbtree.contains(&value) {
                        writeln!(self.out, "found {}", value)?;
                    } else {
                        writeln!(self.out, "{} is not in the tree", value)?;
                    }
                }
            }
            "7" => {
                if let Some(value) = self.read_value()? {
                    if self.rbtree.delete_node(&value) {
                        writeln!(self.out, "removed {}", value)?;
                    } else {
                        writeln!(self.out, "{} is not in the tree, nothing removed", value)?;
                    }
                }
            }
            "8" => {
                if let Some(value) = self.read_value()? {
                    self.rbtree.insert(value);
                    writeln!(self.out, "inserted {}", value)?;
                }
            }
            "s" => {
                if self.rbtree.is_empty() {
                    writeln!(self.out, "tree is empty")?;
                } else {
                    writeln!(self.out, "red nodes are marked with *")?;
                    write!(self.out, "{}", self.rbtree.render())?;
                }
            }
            "c" => self.print_commands()?,
            "<" => self.enter(Menu::Main)?,
            _ => self.unknown_command(command)?,
        }
        Ok(())
    }

    fn read_value(&mut self) -> Result<Option<i64>, Error> {
        let line = self.prompt.read_line("value: ")?;
        match line.as_ref().and_then(|l| l.trim().parse().ok()) {
            Some(value) => Ok(Some(value)),
            None => {
                writeln!(self.out, "value was not read, expected an integer")?;
                Ok(None)
            }
        }
    }

    fn write_values(&mut self, label: &str, values: &[i64]) -> io::Result<()> {
        if values.is_empty() {
            writeln!(self.out, "tree is empty")
        } else {
            writeln!(self.out, "{}: {}", label, values.iter().join(" "))
        }
    }

    fn load_notation(&mut self, text: &str) -> io::Result<()> {
        match self.binary.load(text) {
            Ok(()) => writeln!(self.out, "notation is valid, binary tree built"),
            Err(e) => {
                debug!("rejected notation {:?}: {}", text, e);
                writeln!(self.out, "invalid notation: {}", e)
            }
        }
    }

    fn load_file(&mut self) -> io::Result<()> {
        match read_bracket_file(&self.settings.bracket_file) {
            Ok(text) => {
                writeln!(
                    self.out,
                    "read notation from {}",
                    self.settings.bracket_file.display()
                )?;
                self.load_notation(&text)
            }
            Err(e) => {
                error!("{}", e);
                writeln!(self.out, "{}", e)
            }
        }
    }
}

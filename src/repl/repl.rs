use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::{debug, warn};

use crate::filesystem::FsTree;
use crate::repl::command::{Command, ParseError, parse};
use crate::repl::{help, suggest};

/// The interactive command loop. Owns the tree for the lifetime of the
/// session; every error is recovered at the command boundary and the loop
/// moves on to the next line.
pub struct Repl {
    tree: FsTree,
}

impl Repl {
    pub fn new(tree: FsTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &FsTree {
        &self.tree
    }

    /// Prints the menu, then reads and dispatches lines until `exit` or end
    /// of input.
    pub fn run(&mut self) {
        print!("{}", help::full_help());
        let stdin = io::stdin();
        let mut line = String::new();

        loop {
            print!("{}> ", self.tree.display_path());
            let _ = io::stdout().flush();

            line.clear();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => {
                    debug!("end of input, leaving the command loop");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("failed to read input: {e}");
                    break;
                }
            }

            match parse(&line) {
                Ok(Command::Exit) => break,
                Ok(command) => self.execute(command),
                Err(ParseError::EmptyLine) => {}
                Err(ParseError::UnknownCommand { name }) => match suggest::closest_command(&name) {
                    Some(suggestion) => println!("Unknown command. Did you mean '{suggestion}'?"),
                    None => println!("Unknown command. No similar command found."),
                },
                Err(e) => println!("{e}"),
            }
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Create { name } => match self.tree.create_file(&name) {
                Ok(()) => println!("File created: {name}"),
                Err(e) => println!("{e}"),
            },
            Command::Delete { name } => match self.tree.delete_file(&name) {
                Ok(()) => println!("File deleted: {name}"),
                Err(e) => println!("{e}"),
            },
            Command::Mkdir { name } => match self.tree.make_directory(&name) {
                Ok(()) => println!("Directory created: {name}"),
                Err(e) => println!("{e}"),
            },
            Command::Chdir { name } => {
                if let Err(e) = self.tree.change_directory(&name) {
                    println!("{e}");
                }
            }
            Command::Ls => match self.tree.list_entries() {
                None => println!("Directory is empty."),
                Some((subdirs, files)) => {
                    println!(
                        "Contents of directory '{}':",
                        self.tree.current_dir_name()
                    );
                    for name in subdirs {
                        println!("{}", format!("{name}/").blue().bold());
                    }
                    for name in files {
                        println!("{name}");
                    }
                }
            },
            Command::Move { source, target } => match self.tree.move_file(&source, &target) {
                Ok(()) => println!("Moved file: {source} -> {target}"),
                Err(e) => println!("{e}"),
            },
            Command::Open { name } => {
                if let Err(e) = self.tree.open_file(&name) {
                    println!("{e}");
                }
            }
            Command::Close { name } => match self.tree.close_file(&name) {
                Ok(()) => println!("File closed."),
                Err(e) => println!("{e}"),
            },
            Command::Write { name, text } => match self.tree.open_file(&name) {
                Ok(file) => file.content.append(&text),
                Err(e) => println!("{e}"),
            },
            Command::WriteAt { name, pos, text } => match self.tree.open_file(&name) {
                Ok(file) => file.content.write_at(pos, &text),
                Err(e) => println!("{e}"),
            },
            Command::Read { name } => match self.tree.open_file(&name) {
                Ok(file) => println!("{}", file.content.read_all()),
                Err(e) => println!("{e}"),
            },
            Command::ReadFrom { name, start, size } => match self.tree.open_file(&name) {
                Ok(file) => match file.content.read_from(start, size) {
                    Ok(text) => println!("{text}"),
                    Err(e) => println!("{e}"),
                },
                Err(e) => println!("{e}"),
            },
            Command::MoveWithin {
                name,
                start,
                size,
                target,
            } => match self.tree.open_file(&name) {
                Ok(file) => {
                    if let Err(e) = file.content.move_within(start, size, target) {
                        println!("{e}");
                    }
                }
                Err(e) => println!("{e}"),
            },
            Command::Truncate { name, size } => match self.tree.open_file(&name) {
                Ok(file) => file.content.truncate(size),
                Err(e) => println!("{e}"),
            },
            Command::MemoryMap => print!("{}", self.tree.memory_map()),
            Command::Help { command: None } => print!("{}", help::full_help()),
            Command::Help {
                command: Some(topic),
            } => match help::for_command(&topic) {
                Some(description) => println!("{description}"),
                None => println!("Unknown command. Use 'help' to see the available commands."),
            },
            // `exit` is intercepted by the loop before dispatch.
            Command::Exit => {}
        }
    }
}

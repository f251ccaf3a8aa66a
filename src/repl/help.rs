/// The static help table: command name and its one-line description, in menu
/// order. Also the corpus for the "did you mean" suggestion.
pub const HELP: &[(&str, &str)] = &[
    ("create", "create <filename>                    - Create a new file in the current directory"),
    ("delete", "delete <filename>                    - Delete a file from the current directory"),
    ("mkdir", "mkdir <dirname>                      - Create a new directory"),
    ("chdir", "chdir <dirname>                      - Change to the named directory ('..' goes up)"),
    ("ls", "ls                                   - List files and directories in the current directory"),
    ("move", "move <source> <target>               - Rename/move a file"),
    ("open", "open <filename>                      - Open a file for writing"),
    ("close", "close <filename>                     - Close an opened file"),
    ("write", "write <filename> <text>              - Write text at the end of the file"),
    ("write_at", "write_at <filename> <pos> <text>     - Write text at a specific position"),
    ("read", "read <filename>                      - Read the entire file content"),
    ("read_from", "read_from <filename> <start> <size>  - Read part of a file"),
    ("move_within", "move_within <filename> <start> <size> <target> - Move data inside a file"),
    ("truncate", "truncate <filename> <size>           - Cut the file down to the given length"),
    ("memory_map", "memory_map                           - Show the whole directory tree"),
    ("help", "help [command]                       - Show this table, or one command"),
    ("exit", "exit                                 - Save the filesystem and quit"),
];

/// All command names, for the suggestion lookup.
pub fn command_names() -> impl Iterator<Item = &'static str> {
    HELP.iter().map(|(name, _)| *name)
}

pub fn full_help() -> String {
    let mut out = String::from("Available commands:\n");
    for (_, description) in HELP {
        out.push_str(description);
        out.push('\n');
    }
    out
}

pub fn for_command(name: &str) -> Option<&'static str> {
    HELP.iter()
        .find(|(command, _)| *command == name)
        .map(|(_, description)| *description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_has_an_entry() {
        assert!(for_command("create").is_some());
        assert!(for_command("move_within").is_some());
        assert!(for_command("exit").is_some());
        assert!(for_command("frobnicate").is_none());
    }

    #[test]
    fn full_help_lists_all_entries() {
        let help = full_help();
        for (name, _) in HELP {
            assert!(help.contains(name), "missing entry for {name}");
        }
    }
}

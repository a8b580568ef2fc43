//! Line commands for the interactive console.

use stockyard_domain::{DomainError, LocationItem};

use crate::navigation::{LocationForm, NavigationController, NavigationError};
use crate::render;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the current view, optionally filtered
    List(String),
    /// Open a child row by code
    Open(String),
    Up,
    Home,
    Tree,
    /// Add at the current view level: name, optional code
    Add { name: String, code: Option<String> },
    /// Rename a child row: code, new name
    Rename { code: String, name: String },
    /// Stage a child row for deletion
    Remove(String),
    Confirm,
    Cancel,
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Parse `line`. Returns `None` for blank input.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            "ls" | "list" => Self::List(rest.to_string()),
            "cd" | "open" => Self::Open(required(rest, "cd <code>")?),
            ".." | "up" => Self::Up,
            "home" => Self::Home,
            "tree" => Self::Tree,
            "add" => {
                let (name, code) = match rest.rsplit_once(" --code ") {
                    Some((name, code)) => (name.trim(), Some(code.trim().to_string())),
                    None => (rest, None),
                };
                Self::Add {
                    name: name.to_string(),
                    code,
                }
            }
            "rename" => {
                let usage = "rename <code> <new name>";
                let (code, name) = rest.split_once(' ').ok_or_else(|| format!("usage: {}", usage))?;
                Self::Rename {
                    code: required(code, usage)?,
                    name: required(name, usage)?,
                }
            }
            "rm" | "delete" => Self::Remove(required(rest, "rm <code>")?),
            "y" | "yes" => Self::Confirm,
            "n" | "no" => Self::Cancel,
            "reload" => Self::Reload,
            "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        };
        Ok(Some(command))
    }
}

fn required(value: &str, usage: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err(format!("usage: {}", usage))
    } else {
        Ok(value.to_string())
    }
}

pub const HELP: &str = "\
ls [query]              list the current view
cd <code> | .. | home   navigate
tree                    print the whole forest
add <name> [--code C]   add at the current level
rename <code> <name>    rename a child
rm <code>               delete a child (asks for confirmation)
y | n                   confirm or cancel a pending delete
reload                  re-fetch from the inventory API
q                       quit";

/// Run `command` and return the text to print.
pub async fn execute(
    controller: &mut NavigationController,
    command: Command,
) -> Result<String, NavigationError> {
    match command {
        Command::List(query) => Ok(render::view(controller, &query)),
        Command::Open(code) => {
            let item = find(controller, &code)?;
            controller.drill_down(&item)?;
            Ok(render::view(controller, ""))
        }
        Command::Up => {
            controller.navigate_up();
            Ok(render::view(controller, ""))
        }
        Command::Home => {
            controller.navigate_home();
            Ok(render::view(controller, ""))
        }
        Command::Tree => Ok(render::tree(controller.warehouses())),
        Command::Add { name, code } => {
            let title = controller.open_add_modal()?.title();
            let mut form = LocationForm::named(name);
            if let Some(code) = code {
                form = form.with_code(code);
            }
            if let Err(e) = controller.submit(form).await {
                controller.close_modal();
                return Err(e);
            }
            Ok(format!("{}: done\n{}", title, render::view(controller, "")))
        }
        Command::Rename { code, name } => {
            let item = find(controller, &code)?;
            let mut form = LocationForm::prefilled(&item);
            form.name = name;
            controller.edit(item);
            if let Err(e) = controller.submit(form).await {
                controller.close_modal();
                return Err(e);
            }
            Ok(render::view(controller, ""))
        }
        Command::Remove(code) => {
            let item = find(controller, &code)?;
            let prompt = format!("Delete {} {}? (y/n)", item.level().as_str(), item.code());
            controller.request_delete(item)?;
            Ok(prompt)
        }
        Command::Confirm => {
            controller.confirm_delete()?;
            Ok(render::view(controller, ""))
        }
        Command::Cancel => {
            controller.cancel_delete();
            Ok("Cancelled".to_string())
        }
        Command::Reload => {
            controller.pull().await?;
            Ok(render::view(controller, ""))
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
    }
}

/// Child row of the current view with `code` (case-insensitive).
fn find(controller: &NavigationController, code: &str) -> Result<LocationItem, NavigationError> {
    controller
        .rows("")
        .into_iter()
        .find(|row| row.code().eq_ignore_ascii_case(code))
        .map(|row| row.item)
        .ok_or_else(|| DomainError::not_found(controller.view_level(), code).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("  "), Ok(None));
        assert_eq!(Command::parse("cd Z-01"), Ok(Some(Command::Open("Z-01".into()))));
        assert_eq!(
            Command::parse("add Cold Storage --code cs1"),
            Ok(Some(Command::Add {
                name: "Cold Storage".into(),
                code: Some("cs1".into())
            }))
        );
        assert_eq!(
            Command::parse("rename R-01 Rack North"),
            Ok(Some(Command::Rename {
                code: "R-01".into(),
                name: "Rack North".into()
            }))
        );
        assert!(Command::parse("cd").is_err());
        assert!(Command::parse("fly").is_err());
    }
}

//! Line commands understood by the terminal front end.

use bar_core::{BarField, BarId};

#[derive(Debug, PartialEq)]
pub enum Command {
    Refresh,
    New,
    Edit(BarId),
    Set(BarField, String),
    Submit,
    Cancel,
    Delete(BarId),
    Sample,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  refresh               reload the list from the server
  new                   open the add dialog
  edit <id>             open the edit dialog for a bar
  set <field> <value>   change a field in the open dialog
                        (machine_id, lot_id, product_id, recipe_id, bar_count, time_duration)
  submit                add or update, depending on the dialog
  cancel                close the dialog without saving
  delete <id>           delete a bar (asks first)
  sample                add the current new-bar values without the dialog
  help                  show this text
  quit                  exit";

fn parse_id(arg: Option<&str>) -> Result<BarId, String> {
    let arg = arg.ok_or("missing bar id")?;
    arg.parse()
        .map(BarId)
        .map_err(|_| format!("invalid bar id: {arg}"))
}

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim_start();
    let (word, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));
    match word {
        "refresh" => Ok(Command::Refresh),
        "new" => Ok(Command::New),
        "edit" => parse_id(rest.split_whitespace().next()).map(Command::Edit),
        "delete" => parse_id(rest.split_whitespace().next()).map(Command::Delete),
        "set" => {
            let rest = rest.trim_start();
            let (key, value) = rest.split_once(' ').unwrap_or((rest.trim_end(), ""));
            let field = BarField::from_key(key).ok_or_else(|| format!("unknown field: {key}"))?;
            Ok(Command::Set(field, value.trim_end_matches(['\r', '\n']).to_string()))
        }
        "submit" => Ok(Command::Submit),
        "cancel" => Ok(Command::Cancel),
        "sample" => Ok(Command::Sample),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command: {other}")),
    }
}

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use vrprog::prelude::*;

use crate::{
    error::{CliError, CliResult},
    record::QuestionFile,
};

/// Program strings of a set of question files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Linearized {
    /// One line per rendered program, in file then question order.
    pub lines: Vec<String>,
    /// Programs dropped because they are not chains (chain mode only).
    pub skipped: usize,
    /// Questions without a program.
    pub without_program: usize,
}

/// Render every program found in `inputs` with `mode`.
pub fn linearize(inputs: &[PathBuf], mode: LinearizeMode) -> CliResult<Linearized> {
    let mut result = Linearized::default();

    for path in inputs {
        let file = QuestionFile::load(path)?;
        for (index, question) in file.questions.iter().enumerate() {
            let Some(program) = &question.program else {
                result.without_program += 1;
                continue;
            };
            let rendered = program_to_str(program, mode).map_err(|e| CliError::Program {
                path: path.display().to_string(),
                index,
                source: e,
            })?;
            match rendered {
                Some(line) => result.lines.push(line),
                None => result.skipped += 1,
            }
        }
    }

    if result.skipped > 0 {
        info!(
            "Skipped {} program(s) that are not chains",
            result.skipped
        );
    }
    if result.without_program > 0 {
        debug!("{} question(s) carry no program", result.without_program);
    }
    Ok(result)
}

/// Build the arity table of every function name used in `inputs`.
pub fn build_arity(inputs: &[PathBuf], policy: &ArityPolicy) -> CliResult<ArityTable> {
    let mut programs = Vec::new();
    for path in inputs {
        let file = QuestionFile::load(path)?;
        programs.extend(file.questions.into_iter().filter_map(|q| q.program));
    }

    let table = ArityTable::for_programs(policy, &programs);
    if table.is_empty() {
        warn!("No program found; the arity table is empty");
    }
    Ok(table)
}

/// Parse a prefix or postfix program string back into list form.
pub fn decode(program: &str, mode: LinearizeMode, arity: &ArityTable) -> CliResult<ProgramList> {
    let tokens = str_to_program(program);
    let list = match mode {
        LinearizeMode::Prefix => prefix_to_list(&tokens, arity)?,
        LinearizeMode::Postfix => postfix_to_list(&tokens, arity)?,
        LinearizeMode::Chain => return Err(CliError::ChainNotDecodable),
    };
    Ok(list)
}

/// Load an arity table written by the `arity` command.
pub fn load_arity(path: &Path) -> CliResult<ArityTable> {
    let source = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&source).map_err(|e| CliError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write `contents` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, contents: &str) -> CliResult<()> {
    match path {
        Some(path) => {
            std::fs::write(path, contents).map_err(|e| CliError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            info!("Wrote `{}`", path.display());
            Ok(())
        }
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}

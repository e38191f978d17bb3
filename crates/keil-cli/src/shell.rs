//! Line-oriented interactive shell
//!
//! Reads one command per line, runs it against a [`SyncEngine`] and keeps
//! going after failures. Engine messages go through the engine's reporter;
//! the shell itself only writes prompts, help and usage errors.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use keil_core::SyncEngine;

const PROMPT: &str = "keil-sync> ";

const HELP_EN: &str = "\
Available commands:
\tset_project <path>
\t\t- Set the project file. <path> is the path to the .uvprojx file.
\tcreate_files_group <path> <max_depth> [group_root_name]
\t\t- Create file groups. <path> is the folder to scan, <max_depth> the maximum search depth.
\trefresh_group <group_name> <path> [max_depth]
\t\t- Refresh a file group and its sub-groups (also updates include paths).
\tclean_rebuild_group <group_name> <path> [max_depth]
\t\t- Remove and rebuild a file group so no duplicate groups remain.
\tdel_exist_group <regex_pattern>
\t\t- Delete existing file groups whose name matches <regex_pattern>.
\tadd_include_path <path>
\t\t- Add every folder under <path> holding headers to the include paths.
\tdel_include_path <regex_pattern>
\t\t- Delete include paths matching <regex_pattern>.
\trefresh_project
\t\t- Reload the project file from disk.
\thelp [en|cn]
\t\t- Show this help.
\texit
\t\t- Leave the shell.
Arguments containing spaces can be wrapped in double quotes.
";

const HELP_CN: &str = "\
可用的命令:
\tset_project <path>
\t\t- 设置项目文件路径。<path> 是 .uvprojx 文件的路径。
\tcreate_files_group <path> <max_depth> [group_root_name]
\t\t- 创建文件组。<path> 是起始路径，<max_depth> 是查找的最大深度。
\trefresh_group <group_name> <path> [max_depth]
\t\t- 刷新指定文件组（自动更新头文件路径）。
\tclean_rebuild_group <group_name> <path> [max_depth]
\t\t- 清理重建指定文件组，确保没有重复组。
\tdel_exist_group <regex_pattern>
\t\t- 删除名称匹配正则表达式的文件组。
\tadd_include_path <path>
\t\t- 将 <path> 下包含头文件的目录加入头文件路径。
\tdel_include_path <regex_pattern>
\t\t- 删除匹配正则表达式的头文件路径。
\trefresh_project
\t\t- 从磁盘重新加载项目。
\thelp [en|cn]
\t\t- 显示帮助。
\texit
\t\t- 退出程序。
含空格的参数可以用双引号括起来。
";

/// Language of the help text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HelpLanguage {
    #[default]
    En,
    Cn,
}

impl HelpLanguage {
    pub fn text(self) -> &'static str {
        match self {
            Self::En => HELP_EN,
            Self::Cn => HELP_CN,
        }
    }
}

impl FromStr for HelpLanguage {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "cn" | "zh" | "chinese" => Ok(Self::Cn),
            _ => Err(ShellError::UnknownLanguage(s.to_string())),
        }
    }
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    SetProject {
        path: PathBuf,
    },
    CreateFilesGroup {
        path: PathBuf,
        max_depth: usize,
        prefix: Option<String>,
    },
    RefreshGroup {
        name: String,
        path: PathBuf,
        max_depth: Option<usize>,
    },
    CleanRebuildGroup {
        name: String,
        path: PathBuf,
        max_depth: Option<usize>,
    },
    DelExistGroup {
        pattern: String,
    },
    AddIncludePath {
        path: PathBuf,
    },
    DelIncludePath {
        pattern: String,
    },
    RefreshProject,
    Help {
        language: HelpLanguage,
    },
    Exit,
}

/// What a command needs from the engine before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    None,
    /// A project file has been recorded, loaded or not.
    ProjectPath,
    /// A project file is recorded and parsed.
    Loaded,
}

impl ShellCommand {
    pub fn precondition(&self) -> Precondition {
        match self {
            Self::SetProject { .. } | Self::Help { .. } | Self::Exit => Precondition::None,
            Self::RefreshProject => Precondition::ProjectPath,
            _ => Precondition::Loaded,
        }
    }
}

/// A line that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{command} is missing <{argument}>")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },

    #[error("Invalid depth '{0}': expected a non-negative integer")]
    InvalidDepth(String),

    #[error("Unknown help language '{0}': use en or cn")]
    UnknownLanguage(String),

    #[error("Unterminated quote")]
    UnterminatedQuote,
}

/// Parse one input line. Blank lines give `Ok(None)`; extra arguments are ignored.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let tokens = tokenize(line)?;
    let Some((name, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    let name = name.to_ascii_lowercase();
    let mut args = Args {
        command: &name,
        rest: rest.iter(),
    };

    let command = match name.as_str() {
        "set_project" => ShellCommand::SetProject {
            path: args.required("path")?.into(),
        },
        "create_files_group" => ShellCommand::CreateFilesGroup {
            path: args.required("path")?.into(),
            max_depth: parse_depth(args.required("max_depth")?)?,
            prefix: args.optional(),
        },
        "refresh_group" => ShellCommand::RefreshGroup {
            name: args.required("group_name")?,
            path: args.required("path")?.into(),
            max_depth: args.optional().map(parse_depth).transpose()?,
        },
        "clean_rebuild_group" => ShellCommand::CleanRebuildGroup {
            name: args.required("group_name")?,
            path: args.required("path")?.into(),
            max_depth: args.optional().map(parse_depth).transpose()?,
        },
        "del_exist_group" => ShellCommand::DelExistGroup {
            pattern: args.required("regex_pattern")?,
        },
        "add_include_path" => ShellCommand::AddIncludePath {
            path: args.required("path")?.into(),
        },
        "del_include_path" => ShellCommand::DelIncludePath {
            pattern: args.required("regex_pattern")?,
        },
        "refresh_project" => ShellCommand::RefreshProject,
        "help" => ShellCommand::Help {
            language: args
                .optional()
                .map(|l| l.parse())
                .transpose()?
                .unwrap_or_default(),
        },
        "exit" | "quit" => ShellCommand::Exit,
        _ => return Err(ShellError::UnknownCommand(tokens[0].clone())),
    };

    Ok(Some(command))
}

struct Args<'a> {
    command: &'a str,
    rest: std::slice::Iter<'a, String>,
}

impl Args<'_> {
    fn required(&mut self, argument: &'static str) -> Result<String, ShellError> {
        self.rest
            .next()
            .cloned()
            .ok_or_else(|| ShellError::MissingArgument {
                command: self.command.to_string(),
                argument,
            })
    }

    fn optional(&mut self) -> Option<String> {
        self.rest.next().cloned()
    }
}

fn parse_depth(value: String) -> Result<usize, ShellError> {
    value.parse().map_err(|_| ShellError::InvalidDepth(value))
}

/// Split on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>, ShellError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(ShellError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Interactive read-eval loop over any line source.
pub struct Shell<R, W> {
    engine: SyncEngine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(engine: SyncEngine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn into_engine(self) -> SyncEngine {
        self.engine
    }

    /// Print help, then read commands until `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.write_help(HelpLanguage::default())?;

        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(ShellCommand::Exit)) => break,
                Ok(Some(command)) => {
                    self.dispatch(command)?;
                }
                Err(e) => {
                    writeln!(self.output, "{e}. Type 'help' for usage.")?;
                }
            }
        }

        Ok(())
    }

    /// Check the precondition and run one command. Returns whether it succeeded.
    pub fn dispatch(&mut self, command: ShellCommand) -> io::Result<bool> {
        let ready = match command.precondition() {
            Precondition::None => true,
            Precondition::ProjectPath => self.engine.project_path().is_some(),
            Precondition::Loaded => self.engine.is_loaded(),
        };
        if !ready {
            writeln!(
                self.output,
                "No project loaded. Use 'set_project <path>' first."
            )?;
            return Ok(false);
        }

        tracing::debug!(?command, "Running shell command");
        self.execute(command)
    }

    fn execute(&mut self, command: ShellCommand) -> io::Result<bool> {
        let engine = &mut self.engine;
        let ok = match command {
            ShellCommand::SetProject { path } => engine.set_project(path),
            ShellCommand::CreateFilesGroup {
                path,
                max_depth,
                prefix,
            } => engine.create_group(path, max_depth, prefix.as_deref()),
            ShellCommand::RefreshGroup {
                name,
                path,
                max_depth,
            } => {
                let depth = max_depth.unwrap_or_else(|| engine.default_max_depth());
                engine.refresh_group(&name, path, depth)
            }
            ShellCommand::CleanRebuildGroup {
                name,
                path,
                max_depth,
            } => {
                let depth = max_depth.unwrap_or_else(|| engine.default_max_depth());
                engine.clean_rebuild_group(&name, path, depth)
            }
            ShellCommand::DelExistGroup { pattern } => engine.delete_groups(&pattern),
            ShellCommand::AddIncludePath { path } => engine.add_include_paths(path),
            ShellCommand::DelIncludePath { pattern } => engine.delete_include_paths(&pattern),
            ShellCommand::RefreshProject => engine.refresh_project(),
            ShellCommand::Help { language } => {
                self.write_help(language)?;
                true
            }
            ShellCommand::Exit => true,
        };
        Ok(ok)
    }

    fn write_help(&mut self, language: HelpLanguage) -> io::Result<()> {
        write!(self.output, "{}", language.text())
    }
}

// This file is part of mpc, a minimal Pascal compiler.
// Copyright 2022 Jeffrey Sharp
//
// SPDX-License-Identifier: GPL-3.0-or-later
//
// mpc is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// mpc is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with mpc.  If not, see <http://www.gnu.org/licenses/>.

//! Program entry point and crate root.

mod emit;
mod error;
mod lang;
mod message;
mod session;
mod util;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::debug;

use error::{Error, Result};
use message::{Log, Message, Severity, Stderr};
use session::Session;

/// Name used as the source of messages not tied to a source file.
pub const PROGRAM_NAME: &str = "mpc";

/// Path shown in messages when the source is read from standard input.
const STDIN_PATH: &str = "<stdin>";

/// Compiles a minimal Pascal program to x86 assembly.
#[derive(Parser, Debug)]
#[command(name = PROGRAM_NAME, version)]
struct Cli {
    /// Source file to compile; reads standard input if absent or `-`.
    input: Option<PathBuf>,

    /// Assembly output file; writes standard output if absent.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// When to color diagnostics.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();

    match cli.color {
        ColorChoice::Auto   => (),
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never  => colored::control::set_override(false),
    }

    match run(&cli) {
        Ok(code) => code,
        Err(e)   => {
            Stderr.log(Message::new(Severity::Fatal, format_args!("{}", e)));
            ExitCode::FAILURE
        }
    }
}

/// Installs a log subscriber if `RUST_LOG` is set.  Logs go to standard
/// error so that they never mix with generated code.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let input = cli.input.as_deref().filter(|p| p.as_os_str() != "-");
    let path  = input.map_or(STDIN_PATH.into(), |p| p.display().to_string());

    let content = read_input(input, &path)?;
    debug!(path = %path, len = content.len(), "source read");

    let mut session = Session::new(path, Stderr);

    match cli.output.as_deref() {
        Some(out) => {
            let name = out.display().to_string();
            let file = File::create(out)
                .map_err(|source| Error::Write { path: name.clone(), source })?;
            compile(&mut session, content, BufWriter::new(file))
                .map_err(|e| e.at_output(&name))?;
        }
        None => {
            compile(&mut session, content, BufWriter::new(io::stdout().lock()))?;
        }
    }

    Ok(match session.result() {
        Ok(())  => ExitCode::SUCCESS,
        Err(_)  => ExitCode::FAILURE,
    })
}

fn read_input(input: Option<&Path>, path: &str) -> Result<Vec<u8>> {
    let mut content = Vec::with_capacity(4096);

    let result = match input {
        Some(p) => File::open(p).and_then(|mut f| f.read_to_end(&mut content)),
        None    => io::stdin().read_to_end(&mut content),
    };

    match result {
        Ok(_)       => Ok(content),
        Err(source) => Err(Error::Read { path: path.into(), source }),
    }
}

fn compile<L: Log, W: Write>(session: &mut Session<L>, content: Vec<u8>, output: W) -> Result {
    let mut output = session.compile(content, output)?;
    output.flush()?;
    Ok(())
}

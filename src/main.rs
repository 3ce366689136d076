// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! Runs the interactive viewer on an article manifest. `--query` supplies the URL search string a
//! reader's browser would have carried, which seeds the default highlights.

use std::error::Error;
use std::fs;
use std::process::ExitCode;

use proteus::format::parse_article;
use proteus::tui;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <article.json> [--query <urlquery>]\n  {program} --demo [--query <urlquery>]\n\n--query takes a URL search string such as 'hlPseudocode=blockA&hlLines=2-3' or 'def=term';\na leading '?' is accepted. --demo uses a built-in article and cannot be combined with a path."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    article_path: Option<String>,
    query: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--query" => {
                if options.query.is_some() {
                    return Err(());
                }
                let query = args.next().ok_or(())?;
                options.query = Some(query);
            }
            other => {
                if other.starts_with('-') || options.article_path.is_some() {
                    return Err(());
                }
                options.article_path = Some(other.to_owned());
            }
        }
    }

    if options.demo && options.article_path.is_some() {
        return Err(());
    }

    Ok(options)
}

fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    let article = match &options.article_path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .map_err(|err| format!("failed to read {path}: {err}"))?;
            parse_article(&source).map_err(|err| format!("failed to parse {path}: {err}"))?
        }
        None => tui::demo_article(),
    };

    tui::run(article, options.query.as_deref())
}

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "proteus".to_owned());

    let options = match parse_options(args) {
        Ok(options) if options.demo || options.article_path.is_some() => options,
        Ok(_) | Err(()) => {
            print_usage(&program);
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

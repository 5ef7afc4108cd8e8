//! Input handling for post files and stdin.
//!
//! Posts arrive either as the content API's JSON or as bare Markdown. JSON is
//! recognised by a `.json` extension or a leading `{`.

use crate::post::Post;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("no input: pass a post file or pipe one on stdin")]
    NoInput,

    #[error("{origin} is not a valid post: {source}")]
    InvalidPost {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a post comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin(String),
}

impl InputSource {
    /// Human-readable name for status lines and errors.
    pub fn display_name(&self) -> String {
        match self {
            InputSource::File(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("post")
                .to_string(),
            InputSource::Stdin(_) => "stdin".to_string(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::File(path) => Some(path),
            InputSource::Stdin(_) => None,
        }
    }
}

/// Resolve the CLI file argument. `-` or a missing argument with piped stdin
/// reads stdin eagerly.
pub fn determine_input_source(file: Option<&Path>) -> Result<InputSource, InputError> {
    match file {
        Some(path) if path != Path::new("-") => Ok(InputSource::File(path.to_path_buf())),
        Some(_) => read_stdin().map(InputSource::Stdin),
        None if !io::stdin().is_terminal() => read_stdin().map(InputSource::Stdin),
        None => Err(InputError::NoInput),
    }
}

fn read_stdin() -> Result<String, InputError> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(InputError::Stdin)?;
    Ok(buffer)
}

fn looks_like_json(path: Option<&Path>, text: &str) -> bool {
    let by_extension = path
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    by_extension || text.trim_start().starts_with('{')
}

/// Decode already-read text into a post.
pub fn parse_post(text: String, path: Option<&Path>, origin: &str) -> Result<Post, InputError> {
    if looks_like_json(path, &text) {
        return serde_json::from_str(&text).map_err(|source| InputError::InvalidPost {
            origin: origin.to_string(),
            source,
        });
    }

    let stem = path.and_then(|p| p.file_stem()).and_then(|s| s.to_str());
    Ok(Post::from_markdown(stem, text))
}

/// Read and decode a post from `source`.
pub fn load_post(source: &InputSource) -> Result<Post, InputError> {
    let post = match source {
        InputSource::File(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| InputError::Read {
                path: path.clone(),
                source,
            })?;
            parse_post(text, Some(path), &source.display_name())?
        }
        InputSource::Stdin(text) => parse_post(text.clone(), None, "stdin")?,
    };
    tracing::info!(title = %post.title, source = %source.display_name(), "loaded post");
    Ok(post)
}

//! Interactive command parsing

use crate::results::SortMode;
use thiserror::Error;

/// Search features that can be switched on and off interactively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Deep,
    QueryUnderstanding,
    SmartRerank,
    Cache,
    SocialImpact,
}

impl Feature {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "deep" => Some(Self::Deep),
            "qu" | "query_understanding" => Some(Self::QueryUnderstanding),
            "rerank" | "smart_rerank" => Some(Self::SmartRerank),
            "cache" | "use_cache" => Some(Self::Cache),
            "social" | "social_impact" => Some(Self::SocialImpact),
            _ => None,
        }
    }
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Next,
    Prev,
    Page(usize),
    Sort(SortMode),
    Field(String),
    Toggle(Feature),
    /// Run the Nth (1-based) recommended query
    Suggest(usize),
    Clear,
    Stats,
    Options,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: :{0} (try :help)")]
    Unknown(String),
    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub const HELP: &str = "\
Type a query to search, or one of:
  :next / :prev          move between pages
  :page N                jump to page N
  :sort MODE             relevance | social_impact
  :field NAME            select/deselect an indexing field (metadata, introduction, section, roc)
  :toggle FEATURE        deep | qu | rerank | cache | social
  :suggest N             run the Nth recommended query
  :options               show current search options
  :stats                 show corpus statistics
  :clear                 clear the search
  :quit                  exit
";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Empty);
        }

        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Self::Search(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "page" => Ok(Self::Page(parse_number(arg, "page")?)),
            "sort" => {
                let arg = require(arg, "sort")?;
                arg.parse()
                    .map(Self::Sort)
                    .map_err(CommandError::InvalidArgument)
            }
            "field" => Ok(Self::Field(require(arg, "field")?.to_string())),
            "toggle" => {
                let arg = require(arg, "toggle")?;
                Feature::parse(arg)
                    .map(Self::Toggle)
                    .ok_or_else(|| CommandError::InvalidArgument(arg.to_string()))
            }
            "suggest" | "s" => Ok(Self::Suggest(parse_number(arg, "suggest")?)),
            "clear" | "c" => Ok(Self::Clear),
            "stats" => Ok(Self::Stats),
            "options" | "opts" => Ok(Self::Options),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn require<'a>(arg: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(arg)
    }
}

fn parse_number(arg: &str, command: &'static str) -> Result<usize, CommandError> {
    require(arg, command)?
        .parse()
        .map_err(|_| CommandError::InvalidArgument(arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(
            Command::parse("  graph neural networks "),
            Ok(Command::Search("graph neural networks".to_string()))
        );
        assert_eq!(Command::parse("   "), Ok(Command::Empty));
    }

    #[test]
    fn test_navigation() {
        assert_eq!(Command::parse(":next"), Ok(Command::Next));
        assert_eq!(Command::parse(":p"), Ok(Command::Prev));
        assert_eq!(Command::parse(":page 3"), Ok(Command::Page(3)));
        assert_eq!(
            Command::parse(":page"),
            Err(CommandError::MissingArgument("page"))
        );
        assert_eq!(
            Command::parse(":page two"),
            Err(CommandError::InvalidArgument("two".to_string()))
        );
    }

    #[test]
    fn test_options() {
        assert_eq!(
            Command::parse(":sort social_impact"),
            Ok(Command::Sort(SortMode::SocialImpact))
        );
        assert_eq!(
            Command::parse(":field roc"),
            Ok(Command::Field("roc".to_string()))
        );
        assert_eq!(
            Command::parse(":toggle rerank"),
            Ok(Command::Toggle(Feature::SmartRerank))
        );
        assert!(Command::parse(":toggle turbo").is_err());
        assert!(Command::parse(":sort date").is_err());
    }

    #[test]
    fn test_misc() {
        assert_eq!(Command::parse(":suggest 2"), Ok(Command::Suggest(2)));
        assert_eq!(Command::parse(":q"), Ok(Command::Quit));
        assert_eq!(
            Command::parse(":frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }
}

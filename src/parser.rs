use std::fmt;

use crate::ast::{CommandLine, Redirect, RedirectKind, SimpleCommand};
use crate::tokenizer::tokenize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingRedirectTarget(char),
    MultiplePipes,
    EmptyCommand,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingRedirectTarget(op) => write!(f, "syntax error: no file after '{}'", op),
            ParseError::MultiplePipes => write!(f, "syntax error: only one '|' is supported"),
            ParseError::EmptyCommand => write!(f, "syntax error: missing command"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Removes a trailing `&` and reports whether it was there.
pub fn strip_background(line: &str) -> (&str, bool) {
    let line = line.trim_end();
    match line.strip_suffix('&') {
        Some(rest) => (rest, true),
        None => (line, false),
    }
}

/// Parses one input line.
///
/// Returns `Ok(None)` for a line with no words. The line is split on the
/// pipe token first and redirections are resolved separately on each side.
pub fn parse_line(line: &str) -> Result<Option<CommandLine<'_>>, ParseError> {
    let (line, background) = strip_background(line);
    let tokens = tokenize(line);
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut pipes = tokens.iter().enumerate().filter(|&(_, t)| *t == "|").map(|(i, _)| i);
    let split = pipes.next();
    if pipes.next().is_some() {
        return Err(ParseError::MultiplePipes);
    }

    let (left, right) = match split {
        Some(i) => (parse_simple(&tokens[..i])?, Some(parse_simple(&tokens[i + 1..])?)),
        None => (parse_simple(&tokens)?, None),
    };

    Ok(Some(CommandLine { left, right, background }))
}

fn parse_simple<'a>(words: &[&'a str]) -> Result<SimpleCommand<'a>, ParseError> {
    let mut argv = Vec::with_capacity(words.len());
    let mut redirects = Vec::new();
    let mut iter = words.iter().copied();

    while let Some(word) = iter.next() {
        let Some(kind) = redirect_kind(word) else {
            argv.push(word);
            continue;
        };
        let op = if kind == RedirectKind::In { '<' } else { '>' };
        let target = match iter.next() {
            Some(t) if redirect_kind(t).is_none() => t,
            _ => return Err(ParseError::MissingRedirectTarget(op)),
        };
        redirects.push(Redirect { kind, target });
    }

    if argv.is_empty() {
        return Err(ParseError::EmptyCommand);
    }
    Ok(SimpleCommand { argv, redirects })
}

/// Only the bare words `<` and `>` redirect. `<3` or `>>log` are ordinary
/// arguments.
fn redirect_kind(word: &str) -> Option<RedirectKind> {
    match word {
        "<" => Some(RedirectKind::In),
        ">" => Some(RedirectKind::Out),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> CommandLine<'_> {
        parse_line(src).unwrap().expect("expected a command")
    }

    #[test]
    fn test_simple_command() {
        let line = parse("cp a b");
        assert_eq!(line.left.argv, vec!["cp", "a", "b"]);
        assert_eq!(line.left.name(), "cp");
        assert_eq!(line.left.args(), &["a", "b"]);
        assert!(line.left.redirects.is_empty());
        assert!(line.right.is_none());
        assert!(!line.background);
        assert!(line.is_plain());
    }

    #[test]
    fn test_empty_line_is_none() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line(" \t "), Ok(None));
        assert_eq!(parse_line("&"), Ok(None));
    }

    #[test]
    fn test_background_marker() {
        assert_eq!(strip_background("sleep 5 &"), ("sleep 5 ", true));
        assert_eq!(strip_background("sleep 5&"), ("sleep 5", true));
        assert_eq!(strip_background("sleep 5"), ("sleep 5", false));
        assert_eq!(strip_background("sleep 5 &  "), ("sleep 5 ", true));

        let line = parse("sleep 5 &");
        assert!(line.background);
        assert_eq!(line.left.argv, vec!["sleep", "5"]);
        assert!(!line.is_plain());
    }

    #[test]
    fn test_redirections_are_removed_from_argv() {
        let line = parse("cat < in.txt > out.txt");
        assert_eq!(line.left.argv, vec!["cat"]);
        assert_eq!(
            line.left.redirects,
            vec![
                Redirect { kind: RedirectKind::In, target: "in.txt" },
                Redirect { kind: RedirectKind::Out, target: "out.txt" },
            ]
        );
        assert!(!line.is_plain());
    }

    #[test]
    fn test_glued_operators_are_plain_words() {
        let line = parse("echo <3");
        assert_eq!(line.left.argv, vec!["echo", "<3"]);
        assert!(line.left.redirects.is_empty());

        let line = parse("echo hi >>log");
        assert_eq!(line.left.argv, vec!["echo", "hi", ">>log"]);
        assert!(line.left.redirects.is_empty());

        for word in ["<<", ">>", "<>", "><", "<in.txt", ">out.txt"] {
            let src = format!("cat {word}");
            let line = parse(&src);
            assert_eq!(line.left.argv, vec!["cat", word]);
            assert!(line.left.redirects.is_empty(), "{word} was taken as a redirection");
        }
    }

    #[test]
    fn test_glued_word_is_a_valid_target() {
        let line = parse("sort > >>out");
        assert_eq!(line.left.argv, vec!["sort"]);
        assert_eq!(line.left.redirects, vec![Redirect { kind: RedirectKind::Out, target: ">>out" }]);
    }

    #[test]
    fn test_redirection_in_the_middle() {
        let line = parse("sort > out.txt -r");
        assert_eq!(line.left.argv, vec!["sort", "-r"]);
        assert_eq!(line.left.redirects.len(), 1);
    }

    #[test]
    fn test_missing_redirect_target() {
        assert_eq!(parse_line("cat <"), Err(ParseError::MissingRedirectTarget('<')));
        assert_eq!(parse_line("ls >"), Err(ParseError::MissingRedirectTarget('>')));
        assert_eq!(parse_line("ls > > x"), Err(ParseError::MissingRedirectTarget('>')));
    }

    #[test]
    fn test_pipeline() {
        let line = parse("ls -l | wc -l");
        assert_eq!(line.left.argv, vec!["ls", "-l"]);
        assert_eq!(line.right.as_ref().map(|r| r.argv.clone()), Some(vec!["wc", "-l"]));
        assert!(line.right.is_some());
    }

    #[test]
    fn test_pipe_split_before_redirection() {
        let line = parse("sort < in.txt | uniq > out.txt");
        assert_eq!(line.left.argv, vec!["sort"]);
        assert_eq!(line.left.redirects, vec![Redirect { kind: RedirectKind::In, target: "in.txt" }]);
        let right = line.right.unwrap();
        assert_eq!(right.argv, vec!["uniq"]);
        assert_eq!(right.redirects, vec![Redirect { kind: RedirectKind::Out, target: "out.txt" }]);
    }

    #[test]
    fn test_background_pipeline() {
        let line = parse("cat big | wc -c &");
        assert!(line.background);
        assert_eq!(line.right.unwrap().argv, vec!["wc", "-c"]);
    }

    #[test]
    fn test_multiple_pipes_rejected() {
        assert_eq!(parse_line("a | b | c"), Err(ParseError::MultiplePipes));
    }

    #[test]
    fn test_empty_pipeline_side() {
        assert_eq!(parse_line("| wc"), Err(ParseError::EmptyCommand));
        assert_eq!(parse_line("ls |"), Err(ParseError::EmptyCommand));
        assert_eq!(parse_line("> out"), Err(ParseError::EmptyCommand));
    }
}

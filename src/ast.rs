#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect<'a> {
    pub kind: RedirectKind,
    pub target: &'a str,
}

/// One side of a pipeline: the words to run plus the redirections that
/// were lifted out of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleCommand<'a> {
    pub argv: Vec<&'a str>,
    pub redirects: Vec<Redirect<'a>>,
}

impl<'a> SimpleCommand<'a> {
    pub fn name(&self) -> &'a str {
        self.argv[0]
    }

    pub fn args(&self) -> &[&'a str] {
        &self.argv[1..]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    pub left: SimpleCommand<'a>,
    pub right: Option<SimpleCommand<'a>>,
    pub background: bool,
}

impl CommandLine<'_> {
    /// A line with no pipe and no redirection that the interpreter could
    /// run without forking.
    pub fn is_plain(&self) -> bool {
        !self.background && self.right.is_none() && self.left.redirects.is_empty()
    }
}

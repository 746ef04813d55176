use tree_sitter::Node;

/// A loop whose header is canonical and whose body is being visited.
#[derive(Debug)]
pub struct LoopCandidate<'a> {
    pub index: &'a str,
    pub array: Node<'a>,
    qualifies: bool,
}

impl<'a> LoopCandidate<'a> {
    fn new(index: &'a str, array: Node<'a>) -> Self {
        Self { index, array, qualifies: true }
    }

    pub fn qualifies(&self) -> bool {
        self.qualifies
    }

    /// There is no way back: once disqualified, the loop is never reported.
    pub fn disqualify(&mut self) {
        self.qualifies = false;
    }
}

/// The candidate loops enclosing the node currently visited, outermost first.
#[derive(Debug, Default)]
pub struct LoopScopes<'a> {
    stack: Vec<LoopCandidate<'a>>,
}

impl<'a> LoopScopes<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, index: &'a str, array: Node<'a>) {
        self.stack.push(LoopCandidate::new(index, array));
    }

    pub fn pop(&mut self) -> Option<LoopCandidate<'a>> {
        self.stack.pop()
    }

    /// The innermost open loop whose index is called `name`, so that an inner
    /// `i` shadows an outer `i`.
    pub fn resolve_mut(&mut self, name: &str) -> Option<&mut LoopCandidate<'a>> {
        self.stack
            .iter_mut()
            .rev()
            .find(|candidate| candidate.index == name)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

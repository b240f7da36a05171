use http::Method;

/// The nine standard verbs the set can represent, in iteration order.
static VERBS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
    Method::PATCH,
];

const ALL: u16 = 1 << 9;

/// Fixed-shape method capability set: one bit per standard HTTP verb plus an
/// explicit matches-all flag.
///
/// Extension methods are not representable; [`insert`](MethodSet::insert)
/// reports them and [`contains`](MethodSet::contains) is always false for
/// them. This is deliberate — the set's shape is fixed at construction and
/// never grows keys at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodSet {
    bits: u16,
}

impl MethodSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Whether the method is one of the representable standard verbs.
    #[must_use]
    pub fn is_known(method: &Method) -> bool {
        Self::bit(method).is_some()
    }

    /// Set the flag for a verb. Returns false (and stores nothing) for
    /// extension methods.
    pub fn insert(&mut self, method: &Method) -> bool {
        match Self::bit(method) {
            Some(bit) => {
                self.bits |= bit;
                true
            }
            None => false,
        }
    }

    /// Set the explicit matches-all flag.
    pub fn mark_all(&mut self) {
        self.bits |= ALL;
    }

    /// Whether the matches-all flag is set.
    #[must_use]
    pub fn matches_all(&self) -> bool {
        self.bits & ALL != 0
    }

    /// Whether the verb's flag is set. No matches-all or HEAD fallback logic
    /// here; that lives on [`Route`](crate::Route).
    #[must_use]
    pub fn contains(&self, method: &Method) -> bool {
        Self::bit(method).is_some_and(|bit| self.bits & bit != 0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate the set verbs in fixed order (matches-all excluded).
    pub fn iter(&self) -> impl Iterator<Item = Method> + '_ {
        VERBS.iter().filter(|&m| self.contains(m)).cloned()
    }

    fn bit(method: &Method) -> Option<u16> {
        let index = VERBS.iter().position(|m| m == method)?;
        Some(1 << index)
    }
}

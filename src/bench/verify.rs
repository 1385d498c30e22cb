use serde::Serialize;

/// `a[i - 1] <= a[i]` for every `i`.
pub fn is_sorted(data: &[i32]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

/// Same multiset of values.
pub fn is_permutation(original: &[i32], output: &[i32]) -> bool {
    if original.len() != output.len() {
        return false;
    }
    let mut a = original.to_vec();
    let mut b = output.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Outcome of checking one sort run against its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub sorted: bool,
    pub permutation: bool,
}

impl Verification {
    pub fn check(original: &[i32], output: &[i32]) -> Self {
        Self {
            sorted: is_sorted(output),
            permutation: is_permutation(original, output),
        }
    }

    pub fn ok(&self) -> bool {
        self.sorted && self.permutation
    }
}

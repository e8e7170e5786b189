//! Hashing cost accounting.
//!
//! Mirrors the `grovedb-costs` conventions: operations return a
//! [`CostContext`] wrapping their result together with the number of hash
//! calls they performed, and [`cost_return_on_error!`] acts like `?` while
//! keeping the cost accumulated so far.

use std::ops::{Add, AddAssign};

/// Hash calls performed by an operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times a block's serialized bytes were hashed into a leaf.
    pub hash_byte_calls: u32,
    /// How many times two digests were combined into a parent.
    pub hash_node_calls: u32,
}

impl OperationCost {
    /// Cost with only `hash_byte_calls` set.
    pub fn with_hash_byte_calls(hash_byte_calls: u32) -> Self {
        OperationCost {
            hash_byte_calls,
            ..Default::default()
        }
    }

    /// Cost with only `hash_node_calls` set.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// Total number of hash primitive invocations.
    pub fn total_hash_calls(&self) -> u32 {
        self.hash_byte_calls + self.hash_node_calls
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_byte_calls: self.hash_byte_calls + rhs.hash_byte_calls,
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_byte_calls += rhs.hash_byte_calls;
        self.hash_node_calls += rhs.hash_node_calls;
    }
}

/// Wrapped operation result with associated cost.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// Wrapped operation's return value.
    pub value: T,
    /// Cost of the operation.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Take the wrapped value out, adding its cost to `acc_cost`.
    pub fn unwrap_add_cost(self, acc_cost: &mut OperationCost) -> T {
        *acc_cost += self.cost;
        self.value
    }

    /// Take the wrapped value out, dropping cost data.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Applies `f` to the wrapped value keeping the cost.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        CostContext {
            value: f(self.value),
            cost: self.cost,
        }
    }
}

/// `Result` wrapped into a `CostContext`.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

impl<T, E> CostResult<T, E> {
    /// Applies `f` to the `Ok` value keeping the cost.
    pub fn map_ok<B>(self, f: impl FnOnce(T) -> B) -> CostResult<B, E> {
        self.map(|result| result.map(f))
    }
}

/// Extension trait to wrap values into a `CostContext`.
pub trait CostsExt {
    /// Wraps `self` with the provided cost.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self>
    where
        Self: Sized,
    {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}

/// Like `?` for `CostResult`: unwraps the value adding its cost to the
/// accumulator, or returns early with the error and the cost so far.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// Like [`cost_return_on_error!`] but for a plain `Result`; no cost is added
/// except what was already accumulated.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

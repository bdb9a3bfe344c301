/* src/cli/core/src/build/join.rs */

// Fan-out / fan-in for independent build steps. All members are driven from
// the calling task, so siblings interleave at await points but never run in
// parallel.

use std::future::Future;

use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use futures_util::stream::FuturesUnordered;

use super::error::BuildError;

/// How a join group turns sibling failures into its own result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinPolicy {
  /// Every member runs to completion. A single failure is returned as is;
  /// several come back as `BuildError::Aggregate` in completion order.
  #[default]
  SettleAll,
  /// Return the first failure immediately and drop the unfinished members.
  FailFast,
}

pub struct JoinGroup<'a> {
  name: String,
  policy: JoinPolicy,
  members: Vec<BoxFuture<'a, Result<(), BuildError>>>,
}

impl<'a> JoinGroup<'a> {
  pub fn new(name: impl Into<String>, policy: JoinPolicy) -> Self {
    Self { name: name.into(), policy, members: Vec::new() }
  }

  pub fn push<F>(&mut self, member: F)
  where
    F: Future<Output = Result<(), BuildError>> + Send + 'a,
  {
    self.members.push(Box::pin(member));
  }

  pub fn len(&self) -> usize {
    self.members.len()
  }

  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }

  pub async fn join(self) -> Result<(), BuildError> {
    let Self { name, policy, members } = self;
    let mut pending: FuturesUnordered<_> = members.into_iter().collect();
    let mut errors = Vec::new();

    while let Some(result) = pending.next().await {
      if let Err(e) = result {
        if policy == JoinPolicy::FailFast {
          return Err(e);
        }
        errors.push(e);
      }
    }

    match errors.len() {
      0 => Ok(()),
      1 => Err(errors.remove(0)),
      _ => Err(BuildError::Aggregate { group: name, errors }),
    }
  }
}

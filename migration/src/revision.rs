use std::collections::HashMap;

use sea_orm_migration::MigrationTrait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    pub id: &'static str,
    /// `None` marks the base of the chain.
    pub down_revision: Option<&'static str>,
    pub branch_labels: &'static [&'static str],
    pub depends_on: &'static [&'static str],
}

impl Revision {
    pub const fn new(id: &'static str, down_revision: Option<&'static str>) -> Self {
        Self {
            id,
            down_revision,
            branch_labels: &[],
            depends_on: &[],
        }
    }
}

pub trait Revisioned {
    fn revision(&self) -> Revision;
}

impl Revisioned for Revision {
    fn revision(&self) -> Revision {
        *self
    }
}

impl<T: Revisioned + ?Sized> Revisioned for Box<T> {
    fn revision(&self) -> Revision {
        (**self).revision()
    }
}

pub trait Step: Revisioned + Send + Sync {
    fn into_migration(self: Box<Self>) -> Box<dyn MigrationTrait>;
}

impl<T> Step for T
where
    T: Revisioned + MigrationTrait + 'static,
{
    fn into_migration(self: Box<Self>) -> Box<dyn MigrationTrait> {
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevisionError {
    #[error("revision {0} is declared more than once")]
    Duplicate(String),
    #[error("revision {revision} revises unknown revision {down_revision}")]
    UnknownParent {
        revision: String,
        down_revision: String,
    },
    #[error("revision {revision} depends on unknown revision {dependency}")]
    UnknownDependency {
        revision: String,
        dependency: String,
    },
    #[error("more than one base revision: {}", .0.join(", "))]
    MultipleBases(Vec<String>),
    #[error("revision {parent} is revised by more than one head: {}", .heads.join(", "))]
    MultipleHeads { parent: String, heads: Vec<String> },
    #[error("revisions are not reachable from a base: {}", .0.join(", "))]
    Cycle(Vec<String>),
    #[error("revision {revision} depends on {dependency}, which is applied after it")]
    DependencyOrder {
        revision: String,
        dependency: String,
    },
}

/// Steps in apply order, base first.
pub struct RevisionGraph<T = Box<dyn Step>> {
    steps: Vec<T>,
}

impl<T: Revisioned> RevisionGraph<T> {
    pub fn resolve(steps: Vec<T>) -> Result<Self, RevisionError> {
        let revisions: Vec<Revision> = steps.iter().map(Revisioned::revision).collect();

        let mut index = HashMap::with_capacity(revisions.len());
        for (i, revision) in revisions.iter().enumerate() {
            if index.insert(revision.id, i).is_some() {
                return Err(RevisionError::Duplicate(revision.id.to_owned()));
            }
        }

        let mut bases = Vec::new();
        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, revision) in revisions.iter().enumerate() {
            if let Some(dependency) = revision
                .depends_on
                .iter()
                .find(|dependency| !index.contains_key(*dependency))
            {
                return Err(RevisionError::UnknownDependency {
                    revision: revision.id.to_owned(),
                    dependency: (*dependency).to_owned(),
                });
            }

            match revision.down_revision {
                None => bases.push(i),
                Some(parent) if !index.contains_key(parent) => {
                    return Err(RevisionError::UnknownParent {
                        revision: revision.id.to_owned(),
                        down_revision: parent.to_owned(),
                    });
                }
                Some(parent) => children.entry(parent).or_default().push(i),
            }
        }

        let base = match bases.as_slice() {
            [] if revisions.is_empty() => return Ok(Self { steps }),
            [] => return Err(RevisionError::Cycle(ids(&revisions, 0..revisions.len()))),
            [base] => *base,
            _ => return Err(RevisionError::MultipleBases(ids(&revisions, bases.iter().copied()))),
        };

        let mut order = vec![base];
        let mut current = base;
        loop {
            match children.get(revisions[current].id).map(Vec::as_slice) {
                None | Some([]) => break,
                Some([next]) => {
                    order.push(*next);
                    current = *next;
                }
                Some(heads) => {
                    return Err(RevisionError::MultipleHeads {
                        parent: revisions[current].id.to_owned(),
                        heads: ids(&revisions, heads.iter().copied()),
                    });
                }
            }
        }

        if order.len() != revisions.len() {
            let unreachable = (0..revisions.len()).filter(|i| !order.contains(i));
            return Err(RevisionError::Cycle(ids(&revisions, unreachable)));
        }

        let mut position = vec![0; revisions.len()];
        for (pos, &i) in order.iter().enumerate() {
            position[i] = pos;
        }
        for (i, revision) in revisions.iter().enumerate() {
            for dependency in revision.depends_on {
                if position[index[dependency]] > position[i] {
                    return Err(RevisionError::DependencyOrder {
                        revision: revision.id.to_owned(),
                        dependency: (*dependency).to_owned(),
                    });
                }
            }
        }

        let mut slots: Vec<Option<T>> = steps.into_iter().map(Some).collect();
        let steps: Vec<T> = order.iter().filter_map(|&i| slots[i].take()).collect();
        debug!(
            "resolved revision chain: {}",
            steps
                .iter()
                .map(|s| s.revision().id)
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        Ok(Self { steps })
    }

    pub fn revisions(&self) -> impl Iterator<Item = Revision> + '_ {
        self.steps.iter().map(Revisioned::revision)
    }

    pub fn base(&self) -> Option<Revision> {
        self.steps.first().map(Revisioned::revision)
    }

    pub fn head(&self) -> Option<Revision> {
        self.steps.last().map(Revisioned::revision)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl RevisionGraph<Box<dyn Step>> {
    pub fn into_migrations(self) -> Vec<Box<dyn MigrationTrait>> {
        self.steps
            .into_iter()
            .map(|step| step.into_migration())
            .collect()
    }
}

fn ids(revisions: &[Revision], which: impl IntoIterator<Item = usize>) -> Vec<String> {
    which
        .into_iter()
        .map(|i| revisions[i].id.to_owned())
        .collect()
}

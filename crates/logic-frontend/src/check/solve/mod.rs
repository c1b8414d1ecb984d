mod substitution;

pub use self::substitution::Substitution;

use log::{info, trace};
use thiserror::Error;

use logic_common::types::{Argument, Type};

use super::{Constraint, Provenance};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum UnificationError {
    #[error("expected `{left}`, found `{right}`")]
    NameMismatch {
        left: Type,
        right: Type,
        provenance: Provenance,
    },

    #[error("`{left}` and `{right}` take a different number of arguments")]
    GenericArgumentsCountMismatch {
        left: Type,
        right: Type,
        provenance: Provenance,
    },

    #[error("`{left}` and `{right}` disagree on argument labels")]
    GenericArgumentsLabelMismatch {
        left: Type,
        right: Type,
        provenance: Provenance,
    },

    #[error("`{left}` is a different kind of type than `{right}`")]
    KindMismatch {
        left: Type,
        right: Type,
        provenance: Provenance,
    },

    #[error("`{var}` occurs in `{ty}`")]
    InfiniteType {
        var: Type,
        ty: Type,
        provenance: Provenance,
    },
}

impl UnificationError {
    pub fn provenance(&self) -> &Provenance {
        match self {
            Self::NameMismatch { provenance, .. }
            | Self::GenericArgumentsCountMismatch { provenance, .. }
            | Self::GenericArgumentsLabelMismatch { provenance, .. }
            | Self::KindMismatch { provenance, .. }
            | Self::InfiniteType { provenance, .. } => provenance,
        }
    }
}

/// Solve the constraints, producing a substitution under which both sides of
/// every constraint are equal. Constraints are processed last in, first out.
pub fn unify(constraints: Vec<Constraint>) -> Result<Substitution, UnificationError> {
    info!("unifying {} constraints", constraints.len());

    let mut solver = Solver {
        constraints,
        substitution: Substitution::new(),
    };

    solver.solve()?;

    trace!("done unifying ({} bindings)", solver.substitution.len());
    Ok(solver.substitution)
}

struct Solver {
    constraints: Vec<Constraint>,
    substitution: Substitution,
}

impl Solver {
    fn solve(&mut self) -> Result<(), UnificationError> {
        while let Some(constraint) = self.constraints.pop() {
            if constraint.left == constraint.right {
                continue;
            }

            self.unify(constraint)?;
        }

        Ok(())
    }

    fn unify(&mut self, constraint: Constraint) -> Result<(), UnificationError> {
        match (&constraint.left, &constraint.right) {
            (var @ Type::Var(_), ty) | (ty, var @ Type::Var(_)) => {
                if ty.contains(var) {
                    return Err(UnificationError::InfiniteType {
                        var: var.clone(),
                        ty: ty.clone(),
                        provenance: constraint.provenance,
                    });
                }

                self.substitution.bind(var.clone(), ty.clone());
                self.rewrite();
                Ok(())
            }

            // Generic parameters only ever unify through their instantiations.
            (Type::Generic(_), _) | (_, Type::Generic(_)) => Ok(()),

            (
                Type::Cons {
                    name: left_name,
                    parameters: left_parameters,
                },
                Type::Cons {
                    name: right_name,
                    parameters: right_parameters,
                },
            ) => {
                if left_name != right_name {
                    return Err(UnificationError::NameMismatch {
                        left: constraint.left.clone(),
                        right: constraint.right.clone(),
                        provenance: constraint.provenance,
                    });
                }

                if left_parameters.len() != right_parameters.len() {
                    return Err(UnificationError::GenericArgumentsCountMismatch {
                        left: constraint.left.clone(),
                        right: constraint.right.clone(),
                        provenance: constraint.provenance,
                    });
                }

                let derived: Vec<_> = left_parameters
                    .iter()
                    .zip(right_parameters.iter())
                    .map(|(left, right)| constraint.derive(left.clone(), right.clone()))
                    .collect();

                self.constraints.extend(derived);
                Ok(())
            }

            (
                Type::Fun {
                    arguments: left_arguments,
                    returns: left_returns,
                },
                Type::Fun {
                    arguments: right_arguments,
                    returns: right_returns,
                },
            ) => {
                let derived = self.unify_arguments(&constraint, left_arguments, right_arguments)?;
                self.constraints.extend(derived);
                let (left, right) = (left_returns.as_ref(), right_returns.as_ref());
                self.constraints
                    .push(constraint.derive(left.clone(), right.clone()));
                Ok(())
            }

            (Type::Cons { .. }, Type::Fun { .. }) | (Type::Fun { .. }, Type::Cons { .. }) => {
                Err(UnificationError::KindMismatch {
                    left: constraint.left.clone(),
                    right: constraint.right.clone(),
                    provenance: constraint.provenance,
                })
            }
        }
    }

    /// Pair up the arguments of two function types. Labelled arguments pair by
    /// label and only where both sides have the label; unlabelled ones pair by
    /// position.
    fn unify_arguments(
        &self,
        constraint: &Constraint,
        left: &[Argument],
        right: &[Argument],
    ) -> Result<Vec<Constraint>, UnificationError> {
        let left_labelled = left.iter().any(|arg| arg.label.is_some());
        let right_labelled = right.iter().any(|arg| arg.label.is_some());

        let label_mismatch = || UnificationError::GenericArgumentsLabelMismatch {
            left: constraint.left.clone(),
            right: constraint.right.clone(),
            provenance: constraint.provenance.clone(),
        };

        match (left_labelled, right_labelled) {
            (false, false) => {
                if left.len() != right.len() {
                    return Err(UnificationError::GenericArgumentsCountMismatch {
                        left: constraint.left.clone(),
                        right: constraint.right.clone(),
                        provenance: constraint.provenance.clone(),
                    });
                }

                Ok(left
                    .iter()
                    .zip(right.iter())
                    .map(|(left, right)| constraint.derive(left.ty.clone(), right.ty.clone()))
                    .collect())
            }

            (true, false) if !right.is_empty() => Err(label_mismatch()),
            (false, true) if !left.is_empty() => Err(label_mismatch()),

            _ => Ok(left
                .iter()
                .filter_map(|left| {
                    let label = left.label.as_ref()?;
                    let right = right
                        .iter()
                        .find(|right| right.label.as_ref() == Some(label))?;
                    Some(constraint.derive(left.ty.clone(), right.ty.clone()))
                })
                .collect()),
        }
    }

    /// Apply the substitution to every remaining constraint.
    fn rewrite(&mut self) {
        for constraint in self.constraints.iter_mut() {
            constraint.left = self.substitution.substitute(&constraint.left);
            constraint.right = self.substitution.substitute(&constraint.right);
        }
    }
}

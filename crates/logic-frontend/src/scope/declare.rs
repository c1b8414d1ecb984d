use log::{info, trace};

use logic_common::ast::{Declaration, DeclarationNode, Program};
use logic_common::names::NamePath;
use logic_common::types;

use crate::namespace::{Namespace, NamespaceError};

/// Register every top-level and namespaced declaration of the program. Local
/// declarations (inside function bodies) are left to the lexical scopes.
pub fn declare(program: &Program) -> Result<Namespace, NamespaceError> {
    info!("declaring names");

    let mut declarer = Declarer::new();
    for declaration in program.declarations.iter() {
        declarer.declare_declaration(declaration)?;
    }

    trace!("done declaring names");
    Ok(declarer.namespace)
}

struct Declarer {
    namespace: Namespace,
    path: NamePath,
}

impl Declarer {
    fn new() -> Self {
        Self {
            namespace: Namespace::new(),
            path: NamePath::new(),
        }
    }

    fn declare_declaration(&mut self, declaration: &Declaration) -> Result<(), NamespaceError> {
        match &declaration.node {
            DeclarationNode::Variable { name, .. } | DeclarationNode::Function { name, .. } => {
                self.namespace
                    .declare_value(self.path.child(&name.name), name.id)
            }

            DeclarationNode::Record {
                name,
                declarations,
                ..
            } => {
                // The built-in types are written as literals, not constructed.
                if !types::is_scalar(&name.name) {
                    self.namespace
                        .declare_value(self.path.child(&name.name), name.id)?;
                }

                self.namespace
                    .declare_type(self.path.child(&name.name), name.id)?;

                self.within(&name.name, |declarer| {
                    // Members are only reachable through their getter, never as
                    // a bare name.
                    for member in declarations {
                        if let DeclarationNode::Variable { name, .. } = &member.node {
                            declarer
                                .namespace
                                .declare_value(declarer.path.child(&name.name), name.id)?;
                        }
                    }

                    Ok(())
                })
            }

            DeclarationNode::Enumeration { name, cases, .. } => {
                self.namespace
                    .declare_type(self.path.child(&name.name), name.id)?;

                self.within(&name.name, |declarer| {
                    for case in cases {
                        declarer
                            .namespace
                            .declare_value(declarer.path.child(&case.name.name), case.name.id)?;
                    }

                    Ok(())
                })
            }

            DeclarationNode::Namespace { name, declarations } => {
                self.within(&name.name, |declarer| {
                    for declaration in declarations {
                        declarer.declare_declaration(declaration)?;
                    }

                    Ok(())
                })
            }

            DeclarationNode::Placeholder => Ok(()),
        }
    }

    /// Declare some names within the namespace path of another one.
    fn within<F, T>(&mut self, name: &str, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        self.path.push(name);
        let result = f(self);
        self.path
            .pop()
            .expect("`self.path` modified outside `self.within()`");
        result
    }
}

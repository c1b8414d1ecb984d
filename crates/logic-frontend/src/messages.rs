use logic_common::ast::NodeId;
use logic_common::names::NamePath;
use logic_common::types::Type;

pub trait NameMessages {
    /// A qualified name has already been declared.
    fn duplicate_declaration(&mut self, name: &NamePath, previous: NodeId, is_type: bool);

    /// An identifier does not refer to anything.
    fn unresolved_name(&mut self, name: &str);

    /// A chain of member accesses does not refer to anything.
    fn unresolved_member(&mut self, path: &str);

    /// A type annotation does not name a type.
    fn unresolved_type(&mut self, name: &str);
}

pub trait TypeMessages {
    /// Two type constructors with different names were equated.
    fn name_mismatch(&mut self, left: &Type, right: &Type, labels: &[NodeId]);

    /// Two types take a different number of arguments.
    fn argument_count_mismatch(&mut self, left: &Type, right: &Type, labels: &[NodeId]);

    /// Labelled arguments were equated with unlabelled ones.
    fn label_mismatch(&mut self, left: &Type, right: &Type, labels: &[NodeId]);

    /// A function type was equated with a non-function type.
    fn kind_mismatch(&mut self, left: &Type, right: &Type, labels: &[NodeId]);

    /// A type would have to contain itself.
    fn infinite_type(&mut self, var: &Type, ty: &Type, labels: &[NodeId]);
}

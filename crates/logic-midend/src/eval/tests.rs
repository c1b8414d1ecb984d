use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use logic_common::ast::build::Builder;
use logic_common::ast::{BinaryOperator, Declaration, NodeId, Program};
use logic_common::messages::Code;
use logic_common::prelude;
use logic_common::types::Type;
use logic_frontend::{ScopeContext, UnificationContext};

use super::builtins::MAX_RANGE_LENGTH;
use super::{
    default_value, Arguments, Builtin, Environment, EvaluationContext, EvaluationThunk, Function,
    Hsl, LogicValue, Memory, Rgba,
};

fn environment(b: &mut Builder, program: Program) -> Environment {
    let prelude = prelude::build(b);
    let id = b.id();
    let program = Program::join(id, [prelude, program]);

    let scope = ScopeContext::build(&program, None).unwrap();
    let unification = UnificationContext::build(&scope, &program);
    let substitution = unification.unify().unwrap();

    Environment::new(
        Rc::new(program),
        Rc::new(scope),
        Rc::new(unification),
        Rc::new(substitution),
    )
}

fn evaluation(b: &mut Builder, program: Program) -> EvaluationContext {
    EvaluationContext::build(Rc::new(environment(b, program)))
}

fn name_of(declaration: &Declaration) -> NodeId {
    declaration.name().unwrap().id
}

#[test]
fn arithmetic_is_evaluated() {
    let mut b = Builder::new();

    let one = b.number(1.0);
    let two = b.number(2.0);
    let sum = b.binary(one, BinaryOperator::Add, two);
    let three = b.number(3.0);
    let product = b.binary(sum, BinaryOperator::Multiply, three);
    let x = b.variable("x", None, Some(product));
    let x_id = name_of(&x);

    let program = b.program(vec![x]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::number(9.0)), context.evaluate(x_id));
}

#[test]
fn variables_may_be_used_before_their_declaration() {
    let mut b = Builder::new();

    let use_x = b.name("x");
    let one = b.number(1.0);
    let sum = b.binary(use_x, BinaryOperator::Add, one);
    let y = b.variable("y", None, Some(sum));
    let y_id = name_of(&y);

    let two = b.number(2.0);
    let x = b.variable("x", None, Some(two));

    let program = b.program(vec![y, x]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::number(3.0)), context.evaluate(y_id));
}

#[test]
fn values_are_computed_once() {
    let mut b = Builder::new();
    let program = b.program(Vec::new());
    let mut context = EvaluationContext::new(Rc::new(environment(&mut b, program)));

    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    context.insert_thunk(
        NodeId(0),
        EvaluationThunk::new("counted", Vec::new(), move |_, _| {
            counter.set(counter.get() + 1);
            Some(LogicValue::number(1.0))
        }),
    );
    context.insert_thunk(NodeId(1), EvaluationThunk::forward("first", NodeId(0)));
    context.insert_thunk(NodeId(2), EvaluationThunk::forward("second", NodeId(0)));

    assert_eq!(Some(LogicValue::number(1.0)), context.evaluate(NodeId(1)));
    assert_eq!(Some(LogicValue::number(1.0)), context.evaluate(NodeId(2)));
    assert_eq!(Some(LogicValue::number(1.0)), context.evaluate(NodeId(0)));
    assert_eq!(1, count.get());
}

#[test]
fn missing_values_are_computed_once() {
    let mut b = Builder::new();
    let program = b.program(Vec::new());
    let mut context = EvaluationContext::new(Rc::new(environment(&mut b, program)));

    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    context.insert_thunk(
        NodeId(0),
        EvaluationThunk::new("nothing", Vec::new(), move |_, _| {
            counter.set(counter.get() + 1);
            None
        }),
    );
    context.insert_thunk(NodeId(1), EvaluationThunk::forward("first", NodeId(0)));

    assert!(!context.is_evaluated(NodeId(0)));
    assert_eq!(None, context.evaluate(NodeId(0)));
    assert_eq!(None, context.evaluate(NodeId(0)));
    assert_eq!(None, context.evaluate(NodeId(1)));
    assert!(context.is_evaluated(NodeId(0)));
    assert!(context.is_evaluated(NodeId(1)));
    assert_eq!(None, context.cached(NodeId(0)));
    assert_eq!(1, count.get());
}

#[test]
fn copies_do_not_share_new_values() {
    let mut b = Builder::new();
    let program = b.program(Vec::new());
    let mut context = EvaluationContext::new(Rc::new(environment(&mut b, program)));

    context.insert_thunk(
        NodeId(0),
        EvaluationThunk::constant("one", LogicValue::number(1.0)),
    );

    let mut copy = context.copy();
    assert_eq!(Some(LogicValue::number(1.0)), copy.evaluate(NodeId(0)));
    assert!(copy.cached(NodeId(0)).is_some());
    assert!(context.cached(NodeId(0)).is_none());
}

#[test]
fn replacing_a_thunk_forgets_its_value() {
    let mut b = Builder::new();

    let one = b.number(1.0);
    let x = b.variable("x", None, Some(one));
    let x_id = name_of(&x);

    let program = b.program(vec![x]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::number(1.0)), context.evaluate(x_id));

    context.insert_thunk(x_id, EvaluationThunk::constant("x", LogicValue::number(5.0)));
    assert_eq!(Some(LogicValue::number(5.0)), context.evaluate(x_id));

    context.forget([x_id]);
    assert_eq!(None, context.evaluate(x_id));
}

#[test]
fn cycles_are_never_evaluated() {
    let mut b = Builder::new();

    let use_y = b.name("y");
    let x = b.variable("x", None, Some(use_y));
    let x_id = name_of(&x);

    let use_x = b.name("x");
    let y = b.variable("y", None, Some(use_x));
    let y_id = name_of(&y);

    let one = b.number(1.0);
    let z = b.variable("z", None, Some(one));
    let z_id = name_of(&z);

    let program = b.program(vec![x, y, z]);
    let mut context = evaluation(&mut b, program);

    assert!(context.has_cycles());
    assert_eq!(None, context.evaluate(x_id));
    assert_eq!(None, context.evaluate(y_id));
    assert_eq!(Some(LogicValue::number(1.0)), context.evaluate(z_id));

    let members = context.cycle_members();
    assert!(members.contains(&x_id));
    assert!(members.contains(&y_id));
    assert!(!members.contains(&z_id));

    let cycles = context.cycles();
    assert_eq!(1, cycles.len());
    assert_eq!(4, cycles[0].len());

    let messages = context.messages();
    assert_eq!(1, messages.len());
    assert_eq!(Code::EvaluationError, messages[0].code);
    assert_eq!(x_id, messages[0].at);
}

#[test]
fn a_value_may_depend_on_itself_directly() {
    let mut b = Builder::new();

    let use_x = b.name("x");
    let one = b.number(1.0);
    let sum = b.binary(use_x, BinaryOperator::Add, one);
    let x = b.variable("x", None, Some(sum));
    let x_id = name_of(&x);

    let program = b.program(vec![x]);
    let mut context = evaluation(&mut b, program);

    assert!(context.cycle_members().contains(&x_id));
    assert_eq!(None, context.evaluate(x_id));
}

#[test]
fn unresolved_names_have_no_value() {
    let mut b = Builder::new();

    let missing = b.name("missing");
    let x = b.variable("x", None, Some(missing));
    let x_id = name_of(&x);

    let program = b.program(vec![x]);
    let mut context = evaluation(&mut b, program);

    assert!(!context.has_cycles());
    assert_eq!(None, context.evaluate(x_id));
}

#[test]
fn division_by_zero_has_no_value() {
    let mut b = Builder::new();

    let one = b.number(1.0);
    let zero = b.number(0.0);
    let quotient = b.binary(one, BinaryOperator::Divide, zero);
    let x = b.variable("x", None, Some(quotient));
    let x_id = name_of(&x);

    let program = b.program(vec![x]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(None, context.evaluate(x_id));
}

#[test]
fn comparisons_and_logic() {
    let mut b = Builder::new();

    let two = b.number(2.0);
    let three = b.number(3.0);
    let less = b.binary(two, BinaryOperator::IsLessThan, three);
    let yes = b.boolean(true);
    let no = b.boolean(false);
    let or = b.binary(yes, BinaryOperator::Or, no);
    let both = b.binary(less, BinaryOperator::And, or);
    let x = b.variable("x", None, Some(both));
    let x_id = name_of(&x);

    let a = b.string("a");
    let other = b.string("a");
    let same = b.binary(a, BinaryOperator::IsEqualTo, other);
    let y = b.variable("y", None, Some(same));
    let y_id = name_of(&y);

    let program = b.program(vec![x, y]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::boolean(true)), context.evaluate(x_id));
    assert_eq!(Some(LogicValue::boolean(true)), context.evaluate(y_id));
}

#[test]
fn strings_are_concatenated() {
    let mut b = Builder::new();

    let concat = b.path(&["String", "concat"]);
    let left = b.string("Hello, ");
    let right = b.string("world");
    let call = b.call(concat, vec![(Some("a"), left), (Some("b"), right)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let program = b.program(vec![x]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::string("Hello, world")), context.evaluate(x_id));
}

#[test]
fn ranges_use_their_default_step() {
    let mut b = Builder::new();

    let range = b.path(&["Number", "range"]);
    let from = b.number(0.0);
    let to = b.number(3.0);
    let call = b.call(range, vec![(Some("from"), from), (Some("to"), to)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let program = b.program(vec![x]);
    let mut context = evaluation(&mut b, program);

    let expected = LogicValue::array(
        Type::number(),
        vec![
            LogicValue::number(0.0),
            LogicValue::number(1.0),
            LogicValue::number(2.0),
        ],
    );

    assert_eq!(Some(expected), context.evaluate(x_id));
}

fn range(from: f64, to: f64, by: f64) -> Option<LogicValue> {
    let arguments = Arguments::new([
        (Some("from".to_string()), LogicValue::number(from)),
        (Some("to".to_string()), LogicValue::number(to)),
        (Some("by".to_string()), LogicValue::number(by)),
    ]);

    Builtin::NumberRange.call(&arguments)
}

#[test]
fn ranges_of_large_numbers_end() {
    let values = range(1e16, 1e16 + 8.0, 1.0).unwrap();
    assert_eq!(Some(8), values.as_array().map(<[_]>::len));

    let values = range(0.0, 1.0, 0.25).unwrap();
    let expected: Vec<_> = [0.0, 0.25, 0.5, 0.75]
        .into_iter()
        .map(LogicValue::number)
        .collect();
    assert_eq!(Some(expected.as_slice()), values.as_array());

    let empty = range(3.0, 1.0, 1.0).unwrap();
    assert_eq!(Some(0), empty.as_array().map(<[_]>::len));
}

#[test]
fn oversized_ranges_have_no_value() {
    assert_eq!(None, range(0.0, 1e12, 1.0));
    assert_eq!(None, range(0.0, 1.0, 1e-300));
    assert_eq!(None, range(0.0, f64::INFINITY, 1.0));
    assert_eq!(None, range(f64::NAN, 1.0, 1.0));
    assert_eq!(None, range(0.0, 1.0, 0.0));

    let limit = MAX_RANGE_LENGTH as f64;
    assert_eq!(None, range(0.0, limit + 1.0, 1.0));
}

#[test]
fn arrays_are_indexed_and_counted() {
    let mut b = Builder::new();

    let array = |b: &mut Builder| {
        let elements = vec![b.number(10.0), b.number(20.0), b.number(30.0)];
        b.array(elements)
    };

    let at = b.path(&["Array", "at"]);
    let elements = array(&mut b);
    let index = b.number(1.0);
    let call = b.call(at, vec![(Some("array"), elements), (Some("index"), index)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let at = b.path(&["Array", "at"]);
    let elements = array(&mut b);
    let index = b.number(3.0);
    let call = b.call(at, vec![(Some("array"), elements), (Some("index"), index)]);
    let y = b.variable("y", None, Some(call));
    let y_id = name_of(&y);

    let count = b.path(&["Array", "count"]);
    let elements = array(&mut b);
    let call = b.call(count, vec![(Some("array"), elements)]);
    let z = b.variable("z", None, Some(call));
    let z_id = name_of(&z);

    let program = b.program(vec![x, y, z]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::number(20.0)), context.evaluate(x_id));
    assert_eq!(None, context.evaluate(y_id));
    assert_eq!(Some(LogicValue::number(3.0)), context.evaluate(z_id));
}

#[test]
fn colors_are_transformed() {
    let mut b = Builder::new();

    let set_hue = b.path(&["Color", "setHue"]);
    let red = b.color("#ff0000");
    let hue = b.number(120.0);
    let call = b.call(set_hue, vec![(Some("color"), red), (Some("value"), hue)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let from_hsl = b.path(&["Color", "fromHSL"]);
    let hue = b.number(240.0);
    let saturation = b.number(100.0);
    let lightness = b.number(50.0);
    let call = b.call(
        from_hsl,
        vec![
            (Some("hue"), hue),
            (Some("saturation"), saturation),
            (Some("lightness"), lightness),
        ],
    );
    let y = b.variable("y", None, Some(call));
    let y_id = name_of(&y);

    let program = b.program(vec![x, y]);
    let mut context = evaluation(&mut b, program);

    let x = context.evaluate(x_id).unwrap();
    assert_eq!(Some("#00ff00"), x.as_color());

    let y = context.evaluate(y_id).unwrap();
    assert_eq!(Some("#0000ff"), y.as_color());
}

#[test]
fn colors_convert_through_hsl() {
    assert_eq!(Some(Rgba::new(255, 0, 0)), Rgba::parse("#f00"));
    assert_eq!("#ff0000", Rgba::parse("#FF0000").unwrap().to_string());
    assert_eq!("#ff000080", Rgba::parse("#ff000080").unwrap().to_string());
    assert_eq!(None, Rgba::parse("red"));
    assert_eq!(None, Rgba::parse("#12345"));

    let red = Rgba::new(255, 0, 0).to_hsl();
    assert_eq!(Hsl::new(0.0, 100.0, 50.0), red);

    let white = Hsl::new(red.hue, red.saturation, 100.0).to_rgba(255);
    assert_eq!(Rgba::new(255, 255, 255), white);

    let grey = Hsl::new(red.hue, 0.0, red.lightness).to_rgba(255);
    assert_eq!(Rgba::new(128, 128, 128), grey);

    assert_eq!(Hsl::new(30.0, 50.0, 50.0), Hsl::new(390.0, 50.0, 50.0));
}

fn point(b: &mut Builder) -> Declaration {
    let number = b.ty("Number");
    let zero = b.number(0.0);
    let x = b.variable("x", Some(number), Some(zero));

    let number = b.ty("Number");
    let zero = b.number(0.0);
    let y = b.variable("y", Some(number), Some(zero));

    b.record("Point", &[], vec![x, y])
}

#[test]
fn records_are_constructed_and_read() {
    let mut b = Builder::new();
    let point = point(&mut b);

    let constructor = b.name("Point");
    let one = b.number(1.0);
    let call = b.call(constructor, vec![(Some("x"), one)]);
    let p = b.variable("p", None, Some(call));
    let p_id = name_of(&p);

    let getter = b.path(&["Point", "x"]);
    let use_p = b.name("p");
    let call = b.call(getter, vec![(None, use_p)]);
    let px = b.variable("px", None, Some(call));
    let px_id = name_of(&px);

    let program = b.program(vec![point, p, px]);
    let mut context = evaluation(&mut b, program);

    let expected = LogicValue::new(
        Type::cons("Point"),
        Memory::Record(vec![
            ("x".into(), LogicValue::number(1.0)),
            ("y".into(), LogicValue::number(0.0)),
        ]),
    );

    assert_eq!(Some(expected), context.evaluate(p_id));
    assert_eq!(Some(LogicValue::number(1.0)), context.evaluate(px_id));
}

#[test]
fn uninitialized_members_take_their_argument() {
    let mut b = Builder::new();

    let two = b.number(2.0);
    let z = b.variable("z", None, Some(two));
    let number = b.ty("Number");
    let x = b.variable("x", Some(number), None);
    let point = b.record("Point", &[], vec![z, x]);

    let constructor = b.name("Point");
    let five = b.number(5.0);
    let call = b.call(constructor, vec![(Some("x"), five)]);
    let p = b.variable("p", None, Some(call));
    let p_id = name_of(&p);

    let constructor = b.name("Point");
    let call = b.call(constructor, Vec::new());
    let q = b.variable("q", None, Some(call));
    let q_id = name_of(&q);

    let program = b.program(vec![point, p, q]);
    let mut context = evaluation(&mut b, program);

    let p = context.evaluate(p_id).unwrap();
    assert_eq!(Some(&LogicValue::number(5.0)), p.field("x"));
    assert_eq!(Some(&LogicValue::number(2.0)), p.field("z"));

    let q = context.evaluate(q_id).unwrap();
    assert_eq!(Some(&LogicValue::number(0.0)), q.field("x"));
}

#[test]
fn uninitialized_variables_get_defaults() {
    let mut b = Builder::new();
    let point = point(&mut b);

    let ty = b.ty("Point");
    let p = b.variable("p", Some(ty), None);
    let p_id = name_of(&p);

    let ty = b.ty("String");
    let s = b.variable("s", Some(ty), None);
    let s_id = name_of(&s);

    let number = b.ty("Number");
    let ty = b.generic_ty("Optional", vec![number]);
    let o = b.variable("o", Some(ty), None);
    let o_id = name_of(&o);

    let program = b.program(vec![point, p, s, o]);
    let mut context = evaluation(&mut b, program);

    let p = context.evaluate(p_id).unwrap();
    assert_eq!(Some(&LogicValue::number(0.0)), p.field("y"));

    assert_eq!(Some(LogicValue::string("")), context.evaluate(s_id));

    let o = context.evaluate(o_id).unwrap();
    assert_eq!(Some("none"), o.case());
    assert_eq!(Type::optional(Type::number()), o.ty);
}

#[test]
fn defaults_use_the_type_of_the_right_namespace() {
    let mut b = Builder::new();

    let number = b.ty("Number");
    let zero = b.number(0.0);
    let x = b.variable("x", Some(number), Some(zero));
    let first = b.record("Point", &[], vec![x]);
    let first = b.namespace("First", vec![first]);

    let text = b.ty("String");
    let empty = b.string("");
    let label = b.variable("label", Some(text), Some(empty));
    let second = b.record("Point", &[], vec![label]);
    let ty = b.ty("Point");
    let p = b.variable("p", Some(ty), None);
    let p_id = name_of(&p);
    let second = b.namespace("Second", vec![second, p]);

    let program = b.program(vec![first, second]);
    let mut context = evaluation(&mut b, program);

    let p = context.evaluate(p_id).unwrap();
    assert_eq!(Type::cons("Second.Point"), p.ty);
    assert_eq!(Some(&LogicValue::string("")), p.field("label"));
    assert_eq!(None, p.field("x"));
}

#[test]
fn functions_default_to_constant_functions() {
    let mut b = Builder::new();
    let program = b.program(Vec::new());
    let environment = environment(&mut b, program);

    let ty = Type::fun(Vec::new(), Type::boolean());
    let value = default_value(&environment, &ty).unwrap();

    assert_eq!(
        Some(&Function::Value(Box::new(LogicValue::boolean(false)))),
        value.as_function()
    );
    assert_eq!(None, default_value(&environment, &Type::Var("t0".into())));
}

#[test]
fn enumeration_cases_are_values_or_constructors() {
    let mut b = Builder::new();

    let value = b.path(&["Optional", "value"]);
    let one = b.number(1.0);
    let call = b.call(value, vec![(None, one)]);
    let some = b.variable("some", None, Some(call));
    let some_id = name_of(&some);

    let none = b.path(&["Optional", "none"]);
    let nothing = b.variable("nothing", None, Some(none));
    let nothing_id = name_of(&nothing);

    let program = b.program(vec![some, nothing]);
    let mut context = evaluation(&mut b, program);

    let expected = LogicValue::new(
        Type::optional(Type::number()),
        Memory::Enum {
            case: "value".into(),
            values: vec![LogicValue::number(1.0)],
        },
    );

    assert_eq!(Some(expected), context.evaluate(some_id));

    let nothing = context.evaluate(nothing_id).unwrap();
    assert_eq!(Some("none"), nothing.case());
}

fn double(b: &mut Builder) -> Declaration {
    let number = b.ty("Number");
    let n = b.parameter("n", number, None);

    let use_n = b.name("n");
    let two = b.number(2.0);
    let product = b.binary(use_n, BinaryOperator::Multiply, two);
    let ret = b.ret(product);

    let returns = b.ty("Number");
    b.function("double", &[], vec![n], returns, vec![ret])
}

#[test]
fn functions_are_applied() {
    let mut b = Builder::new();
    let double = double(&mut b);

    let callee = b.name("double");
    let four = b.number(4.0);
    let call = b.call(callee, vec![(Some("n"), four)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let callee = b.name("double");
    let five = b.number(5.0);
    let call = b.call(callee, vec![(Some("n"), five)]);
    let y = b.variable("y", None, Some(call));
    let y_id = name_of(&y);

    let program = b.program(vec![double, x, y]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::number(8.0)), context.evaluate(x_id));
    assert_eq!(Some(LogicValue::number(10.0)), context.evaluate(y_id));
}

#[test]
fn functions_are_values() {
    let mut b = Builder::new();
    let double = double(&mut b);

    let use_double = b.name("double");
    let f = b.variable("f", None, Some(use_double));

    let callee = b.name("f");
    let two = b.number(2.0);
    let call = b.call(callee, vec![(Some("n"), two)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let program = b.program(vec![double, f, x]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::number(4.0)), context.evaluate(x_id));
}

#[test]
fn missing_arguments_use_defaults() {
    let mut b = Builder::new();

    let number = b.ty("Number");
    let a = b.parameter("a", number, None);
    let number = b.ty("Number");
    let ten = b.number(10.0);
    let c = b.parameter("c", number, Some(ten));

    let use_a = b.name("a");
    let use_c = b.name("c");
    let sum = b.binary(use_a, BinaryOperator::Add, use_c);
    let ret = b.ret(sum);
    let returns = b.ty("Number");
    let add = b.function("add", &[], vec![a, c], returns, vec![ret]);

    let callee = b.name("add");
    let one = b.number(1.0);
    let call = b.call(callee, vec![(Some("a"), one)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let callee = b.name("add");
    let call = b.call(callee, Vec::new());
    let y = b.variable("y", None, Some(call));
    let y_id = name_of(&y);

    let program = b.program(vec![add, x, y]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::number(11.0)), context.evaluate(x_id));
    assert_eq!(Some(LogicValue::number(10.0)), context.evaluate(y_id));
}

#[test]
fn only_reachable_returns_count() {
    let mut b = Builder::new();

    let boolean = b.ty("Boolean");
    let flag = b.parameter("flag", boolean, None);

    let use_flag = b.name("flag");
    let yes = b.string("yes");
    let ret_yes = b.ret(yes);
    let branch = b.branch(use_flag, vec![ret_yes]);
    let no = b.string("no");
    let ret_no = b.ret(no);

    let returns = b.ty("String");
    let pick = b.function("pick", &[], vec![flag], returns, vec![branch, ret_no]);

    let callee = b.name("pick");
    let yes = b.boolean(true);
    let call = b.call(callee, vec![(Some("flag"), yes)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let callee = b.name("pick");
    let no = b.boolean(false);
    let call = b.call(callee, vec![(Some("flag"), no)]);
    let y = b.variable("y", None, Some(call));
    let y_id = name_of(&y);

    let program = b.program(vec![pick, x, y]);
    let mut context = evaluation(&mut b, program);

    assert_eq!(Some(LogicValue::string("yes")), context.evaluate(x_id));
    assert_eq!(Some(LogicValue::string("no")), context.evaluate(y_id));
}

#[test]
fn functions_without_a_return_produce_unit() {
    let mut b = Builder::new();

    let boolean = b.ty("Boolean");
    let flag = b.parameter("flag", boolean, None);
    let use_flag = b.name("flag");
    let one = b.number(1.0);
    let ret = b.ret(one);
    let branch = b.branch(use_flag, vec![ret]);
    let returns = b.ty("Number");
    let maybe = b.function("maybe", &[], vec![flag], returns, vec![branch]);

    let callee = b.name("maybe");
    let no = b.boolean(false);
    let call = b.call(callee, vec![(Some("flag"), no)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let program = b.program(vec![maybe, x]);
    let mut context = evaluation(&mut b, program);

    let x = context.evaluate(x_id).unwrap();
    assert_eq!(Memory::Unit, x.memory);
}

fn count_down(b: &mut Builder, name: &str) -> Declaration {
    let number = b.ty("Number");
    let n = b.parameter("n", number, None);

    let use_n = b.name("n");
    let zero = b.number(0.0);
    let positive = b.binary(use_n, BinaryOperator::IsGreaterThan, zero);

    let callee = b.name(name);
    let use_n = b.name("n");
    let one = b.number(1.0);
    let smaller = b.binary(use_n, BinaryOperator::Subtract, one);
    let call = b.call(callee, vec![(Some("n"), smaller)]);
    let one = b.number(1.0);
    let sum = b.binary(call, BinaryOperator::Add, one);
    let ret = b.ret(sum);
    let branch = b.branch(positive, vec![ret]);

    let zero = b.number(0.0);
    let base = b.ret(zero);

    let returns = b.ty("Number");
    b.function(name, &[], vec![n], returns, vec![branch, base])
}

#[test]
fn functions_may_recurse() {
    let mut b = Builder::new();
    let count = count_down(&mut b, "count");

    let callee = b.name("count");
    let three = b.number(3.0);
    let call = b.call(callee, vec![(Some("n"), three)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let program = b.program(vec![count, x]);
    let mut context = evaluation(&mut b, program);

    assert!(!context.has_cycles());
    assert_eq!(Some(LogicValue::number(3.0)), context.evaluate(x_id));
}

#[test]
fn deep_recursion_is_abandoned() {
    let mut b = Builder::new();
    let count = count_down(&mut b, "count");

    let callee = b.name("count");
    let many = b.number(100.0);
    let call = b.call(callee, vec![(Some("n"), many)]);
    let x = b.variable("x", None, Some(call));
    let x_id = name_of(&x);

    let callee = b.name("count");
    let few = b.number(5.0);
    let call = b.call(callee, vec![(Some("n"), few)]);
    let y = b.variable("y", None, Some(call));
    let y_id = name_of(&y);

    let program = b.program(vec![count, x, y]);
    let mut environment = environment(&mut b, program);
    environment.call_depth_limit = 10;
    let mut context = EvaluationContext::build(Rc::new(environment));

    assert_eq!(None, context.evaluate(x_id));
    assert_eq!(Some(LogicValue::number(5.0)), context.evaluate(y_id));
}

#[test]
fn values_are_displayed() {
    let array = LogicValue::array(
        Type::number(),
        vec![LogicValue::number(1.0), LogicValue::number(2.5)],
    );
    assert_eq!("[1, 2.5]", array.to_string());

    let point = LogicValue::new(
        Type::cons("Point"),
        Memory::Record(vec![
            ("x".into(), LogicValue::number(1.0)),
            ("y".into(), LogicValue::string("up")),
        ]),
    );
    assert_eq!("Point(x: 1, y: \"up\")", point.to_string());

    let none = LogicValue::new(
        Type::optional(Type::number()),
        Memory::Enum {
            case: "none".into(),
            values: Vec::new(),
        },
    );
    assert_eq!(".none", none.to_string());
    assert_eq!("#ff0000", LogicValue::color("#ff0000").to_string());
}

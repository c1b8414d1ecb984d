use pretty_assertions::assert_eq;

use logic_common::ast::build::Builder;
use logic_common::ast::BinaryOperator;
use logic_common::messages::Code;
use logic_common::types::Type;
use logic_midend::LogicValue;

use super::{compile, CollectingDriver, EvalAmount};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn codes(driver: &CollectingDriver) -> Vec<Code> {
    driver.messages.iter().map(|message| message.code).collect()
}

#[test]
fn programs_are_evaluated() {
    init();
    let mut b = Builder::new();

    let set_hue = b.path(&["Color", "setHue"]);
    let red = b.color("#ff0000");
    let hue = b.number(120.0);
    let call = b.call(set_hue, vec![(Some("color"), red), (Some("value"), hue)]);
    let green = b.variable("green", None, Some(call));
    let green_id = green.name().unwrap().id;

    let program = b.program(vec![green]);
    let mut driver = CollectingDriver::new();
    let mut compilation = compile(&mut driver, program);

    assert_eq!(Vec::<Code>::new(), codes(&driver));
    assert_eq!(Some(Type::color()), compilation.type_of(green_id));

    let green = compilation.evaluate(green_id).unwrap();
    assert_eq!(Some("#00ff00"), green.as_color());
}

#[test]
fn unresolved_names_are_reported() {
    init();
    let mut b = Builder::new();

    let missing = b.name("missing");
    let missing_id = missing.id;
    let x = b.variable("x", None, Some(missing));

    let one = b.number(1.0);
    let y = b.variable("y", None, Some(one));
    let y_id = y.name().unwrap().id;

    let program = b.program(vec![x, y]);
    let mut driver = CollectingDriver::new();
    let mut compilation = compile(&mut driver, program);

    assert_eq!(vec![Code::NameError], codes(&driver));
    assert_eq!(missing_id, driver.messages[0].at);
    assert_eq!(Some(LogicValue::number(1.0)), compilation.evaluate(y_id));
}

#[test]
fn type_errors_stop_evaluation() {
    init();
    let mut b = Builder::new();

    let number = b.ty("Number");
    let text = b.string("one");
    let x = b.variable("x", Some(number), Some(text));
    let x_id = x.name().unwrap().id;

    let program = b.program(vec![x]);
    let mut driver = CollectingDriver::new();
    let mut compilation = compile(&mut driver, program);

    assert_eq!(vec![Code::TypeError], codes(&driver));
    assert!(compilation.unification().is_some());
    assert!(compilation.substitution().is_none());
    assert_eq!(None, compilation.evaluate(x_id));
}

#[test]
fn duplicate_declarations_stop_everything() {
    init();
    let mut b = Builder::new();

    let one = b.number(1.0);
    let first = b.variable("x", None, Some(one));
    let two = b.number(2.0);
    let second = b.variable("x", None, Some(two));
    let second_id = second.name().unwrap().id;

    let program = b.program(vec![first, second]);
    let mut driver = CollectingDriver::new();
    let compilation = compile(&mut driver, program);

    assert_eq!(vec![Code::DeclarationError], codes(&driver));
    assert_eq!(second_id, driver.messages[0].at);
    assert!(compilation.scope().is_none());
}

#[test]
fn prelude_names_cannot_be_redeclared() {
    init();
    let mut b = Builder::new();

    let number = b.record("Number", &[], Vec::new());
    let program = b.program(vec![number]);
    let mut driver = CollectingDriver::new();
    let compilation = compile(&mut driver, program);

    assert_eq!(vec![Code::DeclarationError], codes(&driver));
    assert!(compilation.scope().is_none());
}

#[test]
fn the_driver_decides_how_far_to_go() {
    init();
    let mut b = Builder::new();

    let one = b.number(1.0);
    let two = b.number(2.0);
    let sum = b.binary(one, BinaryOperator::Add, two);
    let x = b.variable("x", None, Some(sum));
    let x_id = x.name().unwrap().id;
    let program = b.program(vec![x]);

    let mut driver = CollectingDriver::new();
    driver.amount = EvalAmount::Types;
    let mut compilation = compile(&mut driver, program.clone());

    assert_eq!(Some(Type::number()), compilation.type_of(x_id));
    assert_eq!(None, compilation.evaluate(x_id));

    driver.amount = EvalAmount::None;
    let compilation = compile(&mut driver, program);

    assert!(compilation.scope().is_some());
    assert_eq!(None, compilation.type_of(x_id));
}

#[test]
fn cycles_are_reported() {
    init();
    let mut b = Builder::new();

    let use_x = b.name("x");
    let one = b.number(1.0);
    let sum = b.binary(use_x, BinaryOperator::Add, one);
    let x = b.variable("x", None, Some(sum));
    let x_id = x.name().unwrap().id;

    let program = b.program(vec![x]);
    let mut driver = CollectingDriver::new();
    let mut compilation = compile(&mut driver, program);

    assert_eq!(vec![Code::EvaluationError], codes(&driver));
    assert_eq!(x_id, driver.messages[0].at);
    assert_eq!(None, compilation.evaluate(x_id));
}

#[test]
fn names_in_scope_are_listed() {
    init();
    let mut b = Builder::new();

    let number = b.ty("Number");
    let a = b.parameter("a", number, None);
    let use_a = b.name("a");
    let use_id = use_a.id;
    let ret = b.ret(use_a);
    let returns = b.ty("Number");
    let f = b.function("f", &[], vec![a], returns, vec![ret]);

    let one = b.number(1.0);
    let g = b.variable("g", None, Some(one));

    let program = b.program(vec![f, g]);
    let mut driver = CollectingDriver::new();
    let compilation = compile(&mut driver, program);

    let names: Vec<_> = compilation
        .names_in_scope_at(use_id)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    assert_eq!(vec!["f".to_string(), "a".to_string()], names);

    let visible: Vec<_> = compilation
        .visible_names_at(use_id)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    assert!(visible.contains(&"g".to_string()));
    assert_eq!(Some(&"a".to_string()), visible.last());
    assert_eq!(1, visible.iter().filter(|name| *name == "f").count());
}

#[test]
fn the_driver_limits_call_depth() {
    init();
    let mut b = Builder::new();

    let number = b.ty("Number");
    let n = b.parameter("n", number, None);
    let callee = b.name("forever");
    let use_n = b.name("n");
    let call = b.call(callee, vec![(Some("n"), use_n)]);
    let ret = b.ret(call);
    let returns = b.ty("Number");
    let forever = b.function("forever", &[], vec![n], returns, vec![ret]);

    let callee = b.name("forever");
    let zero = b.number(0.0);
    let call = b.call(callee, vec![(Some("n"), zero)]);
    let x = b.variable("x", None, Some(call));
    let x_id = x.name().unwrap().id;

    let program = b.program(vec![forever, x]);
    let mut driver = CollectingDriver::new();
    driver.call_depth_limit = 4;
    let mut compilation = compile(&mut driver, program);

    assert_eq!(Vec::<Code>::new(), codes(&driver));
    assert_eq!(None, compilation.evaluate(x_id));
}

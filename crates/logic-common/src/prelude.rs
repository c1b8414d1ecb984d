//! The standard library every program is compiled against.
//!
//! The built-in types are declared as empty records, and the built-in functions
//! as functions with empty bodies. The evaluator recognizes the latter by their
//! qualified name and supplies a native implementation.

use crate::ast::build::Builder;
use crate::ast::{Declaration, Program};
use crate::types::{ARRAY, BOOLEAN, COLOR, NUMBER, OPTIONAL, STRING};

/// Prelude node ids start here, far away from the ids an editor hands out.
pub const FIRST_ID: usize = usize::MAX / 2;

/// Build the prelude with ids starting at [`FIRST_ID`].
pub fn program() -> Program {
    let mut builder = Builder::starting_at(FIRST_ID);
    build(&mut builder)
}

/// Build the prelude using ids from the given builder.
pub fn build(b: &mut Builder) -> Program {
    let mut declarations = Vec::new();

    for name in [BOOLEAN, NUMBER, STRING, COLOR] {
        declarations.push(b.record(name, &[], Vec::new()));
    }

    declarations.push(b.record(ARRAY, &["T"], Vec::new()));

    let t = b.ty("T");
    let value = b.case("value", vec![t]);
    let none = b.case("none", Vec::new());
    declarations.push(b.enumeration(OPTIONAL, &["T"], vec![value, none]));

    declarations.push(boolean(b));
    declarations.push(string(b));
    declarations.push(array(b));
    declarations.push(number(b));
    declarations.push(color(b));

    b.program(declarations)
}

/// Declare a function without a body whose parameters are all named and
/// annotated with plain type names.
fn native(
    b: &mut Builder,
    name: &str,
    parameters: &[(&str, &str)],
    returns: &str,
) -> Declaration {
    let parameters = parameters
        .iter()
        .map(|(name, ty)| {
            let ty = b.ty(ty);
            b.parameter(name, ty, None)
        })
        .collect();

    let returns = b.ty(returns);
    b.function(name, &[], parameters, returns, Vec::new())
}

fn boolean(b: &mut Builder) -> Declaration {
    let params = [("a", BOOLEAN), ("b", BOOLEAN)];
    let and = native(b, "and", &params, BOOLEAN);
    let or = native(b, "or", &params, BOOLEAN);
    b.namespace(BOOLEAN, vec![and, or])
}

fn string(b: &mut Builder) -> Declaration {
    let concat = native(b, "concat", &[("a", STRING), ("b", STRING)], STRING);
    b.namespace(STRING, vec![concat])
}

fn array(b: &mut Builder) -> Declaration {
    let at = {
        let t = b.ty("T");
        let array = b.generic_ty(ARRAY, vec![t]);
        let array = b.parameter("array", array, None);
        let number = b.ty(NUMBER);
        let index = b.parameter("index", number, None);
        let returns = b.ty("T");
        b.function("at", &["T"], vec![array, index], returns, Vec::new())
    };

    let count = {
        let t = b.ty("T");
        let array = b.generic_ty(ARRAY, vec![t]);
        let array = b.parameter("array", array, None);
        let returns = b.ty(NUMBER);
        b.function("count", &["T"], vec![array], returns, Vec::new())
    };

    b.namespace(ARRAY, vec![at, count])
}

fn number(b: &mut Builder) -> Declaration {
    let range = {
        let from = b.ty(NUMBER);
        let from = b.parameter("from", from, None);
        let to = b.ty(NUMBER);
        let to = b.parameter("to", to, None);
        let by = b.ty(NUMBER);
        let step = b.number(1.0);
        let by = b.parameter("by", by, Some(step));
        let number = b.ty(NUMBER);
        let returns = b.generic_ty(ARRAY, vec![number]);
        b.function("range", &[], vec![from, to, by], returns, Vec::new())
    };

    b.namespace(NUMBER, vec![range])
}

fn color(b: &mut Builder) -> Declaration {
    let set_hue = native(b, "setHue", &[("color", COLOR), ("value", NUMBER)], COLOR);
    let set_saturation = native(
        b,
        "setSaturation",
        &[("color", COLOR), ("value", NUMBER)],
        COLOR,
    );
    let set_lightness = native(
        b,
        "setLightness",
        &[("color", COLOR), ("value", NUMBER)],
        COLOR,
    );
    let from_hsl = native(
        b,
        "fromHSL",
        &[("hue", NUMBER), ("saturation", NUMBER), ("lightness", NUMBER)],
        COLOR,
    );
    let saturate = native(b, "saturate", &[("color", COLOR), ("factor", NUMBER)], COLOR);

    b.namespace(
        COLOR,
        vec![set_hue, set_saturation, set_lightness, from_hsl, saturate],
    )
}

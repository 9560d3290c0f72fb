use std::any::{Any, TypeId};

use rts_bridge::{Capability, RegistryBridge, Reflection, ReflectionConfig, RuntimeBridge};
use rts_core::with_uninitialized_string;

const DESCRIBE: Capability = Capability::new(10, "Describe");
const ORDERED: Capability = Capability::new(11, "Ordered");

struct Point {
    x: i32,
    y: i32,
}

struct DescribeWitness {
    describe: fn(&dyn Any) -> String,
}

fn describe_point(v: &dyn Any) -> String {
    match v.downcast_ref::<Point>() {
        Some(p) => format!("({}, {})", p.x, p.y),
        None => String::new(),
    }
}

static POINT_DESCRIBE: DescribeWitness = DescribeWitness {
    describe: describe_point,
};

fn registry() -> RegistryBridge {
    let mut reg = RegistryBridge::new();
    reg.register_conformance::<Point>(DESCRIBE, &POINT_DESCRIBE)
        .unwrap();
    reg.register_type_name::<Point>("_R5Point", "geom::Point")
        .unwrap();
    reg
}

fn config(qualified_names: bool) -> ReflectionConfig {
    ReflectionConfig {
        trace: false,
        qualified_names,
    }
}

#[test]
fn registered_conformance_casts_with_witness() {
    let rf = Reflection::with_config(Box::new(registry()), config(true));
    let p = Point { x: 3, y: -4 };
    assert!(rf.conforms_to(&p, DESCRIBE));
    assert!(!rf.conforms_to(&p, ORDERED));
    let view = rf.cast_to_capability(&p, DESCRIBE);
    let witness = view.witness::<DescribeWitness>().unwrap();
    assert_eq!((witness.describe)(view.value()), "(3, -4)");
    assert_eq!(rf.try_cast_to_capability(&p, DESCRIBE), Some(view));
    assert!(rf.try_cast_to_capability(&7u32, DESCRIBE).is_none());
}

#[test]
#[should_panic(expected = "Point as Ordered")]
fn cast_diagnostic_names_type_and_capability() {
    let rf = Reflection::with_config(Box::new(registry()), config(true));
    rf.cast_to_capability(&Point { x: 0, y: 0 }, ORDERED);
}

#[test]
fn duplicate_conformance_is_rejected() {
    let mut reg = registry();
    let err = reg
        .register_conformance::<Point>(DESCRIBE, &POINT_DESCRIBE)
        .unwrap_err();
    assert!(err.starts_with("conformance already registered"), "{err}");
    assert_eq!(reg.conformance_count(), 1);
    reg.register_conformance::<Point>(ORDERED, &POINT_DESCRIBE)
        .unwrap();
    assert_eq!(reg.conformance_count(), 2);
}

#[test]
fn conflicting_type_name_is_rejected() {
    let mut reg = registry();
    assert!(reg.register_type_name::<Point>("_R5Point", "geom::Point").is_ok());
    assert!(reg.register_type_name::<Point>("_R6Point2", "geom::Point").is_err());
    assert!(reg.register_type_name::<u8>("_R5Point", "u8").is_err());
}

#[test]
fn mangled_name_belongs_to_one_type() {
    let mut reg = registry();
    let err = reg
        .register_type_name::<u8>("_R5Point", "geom::Point")
        .unwrap_err();
    assert!(err.starts_with("conflicting type name registration"), "{err}");

    let rf = Reflection::with_config(Box::new(reg), config(true));
    assert_eq!(rf.type_name(&1u8), "u8");
}

#[test]
fn registered_names_demangle() {
    let rf = Reflection::with_config(Box::new(registry()), config(true));
    let p = Point { x: 1, y: 1 };
    assert_eq!(rf.type_name(&p), "_R5Point");
    assert_eq!(rf.demangled_type_name(&p), "geom::Point");

    let short = Reflection::with_config(Box::new(registry()), config(false));
    assert_eq!(short.demangled_type_name(&p), "Point");
}

#[test]
fn unregistered_types_fall_back_to_rust_names() {
    let rf = Reflection::with_config(Box::new(RegistryBridge::new()), config(true));
    let v: Vec<String> = Vec::new();
    assert_eq!(rf.type_name(&v), std::any::type_name::<Vec<String>>());
    assert_eq!(rf.demangled_type_name(&v), std::any::type_name::<Vec<String>>());

    let short = Reflection::with_config(Box::new(RegistryBridge::new()), config(false));
    assert_eq!(short.demangled_type_name(&v), "Vec<String>");
}

#[test]
fn non_utf8_mangled_names_pass_through_lossily() {
    let reg = RegistryBridge::new();
    let ((), name) = with_uninitialized_string(|out| reg.demangle_name(b"_R\xff", out));
    assert_eq!(name, "_R\u{fffd}");
}

#[test]
fn erased_values_are_looked_up_by_dynamic_type() {
    let rf = Reflection::with_config(Box::new(registry()), config(true));
    let erased: Box<dyn Any> = Box::new(Point { x: 5, y: 6 });
    let inner: &dyn Any = &*erased;

    assert!(rf.conforms_to(inner, DESCRIBE));
    let view = rf.try_cast_to_capability(inner, DESCRIBE).expect("Point is Describe");
    assert_eq!(rf.cast_to_capability(inner, DESCRIBE), view);
    let witness = view.witness::<DescribeWitness>().unwrap();
    assert_eq!((witness.describe)(view.value()), "(5, 6)");
    assert_eq!(rf.type_name(inner), "_R5Point");
    assert_eq!(rf.demangled_type_name(inner), "geom::Point");

    // The box is a value of its own.
    assert!(!rf.conforms_to(&erased, DESCRIBE));
}

#[test]
fn erased_send_values_are_looked_up_by_dynamic_type() {
    let rf = Reflection::with_config(Box::new(registry()), config(true));
    let erased: Box<dyn Any + Send + Sync> = Box::new(Point { x: 0, y: 1 });
    assert!(rf.conforms_to(&*erased, DESCRIBE));
    assert_eq!(rf.type_name(&*erased), "_R5Point");
}

#[test]
fn erased_values_fall_back_to_registered_or_opaque_names() {
    let mut reg = RegistryBridge::new();
    reg.register_conformance::<u16>(ORDERED, &POINT_DESCRIBE)
        .unwrap();
    let rf = Reflection::with_config(Box::new(reg), config(true));

    let known: Box<dyn Any> = Box::new(7u16);
    assert_eq!(rf.type_name(&*known), "u16");

    let unknown: Box<dyn Any> = Box::new(7i8);
    assert_eq!(rf.type_name(&*unknown), format!("{:?}", TypeId::of::<i8>()));
}

#[test]
#[should_panic(expected = "geom::Point as Ordered")]
fn erased_cast_diagnostic_names_dynamic_type() {
    let rf = Reflection::with_config(Box::new(registry()), config(true));
    let erased: Box<dyn Any> = Box::new(Point { x: 0, y: 0 });
    rf.cast_to_capability(&*erased, ORDERED);
}

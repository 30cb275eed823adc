//! Integration tests for the spire-error-internals crate.

use std::{any::TypeId, fmt};

use spire_error_internals::{RawDiagnostic, handlers::DiagnosticHandler};

#[derive(Debug, PartialEq)]
struct ErrorCode(i32);

struct CodeHandler;

impl DiagnosticHandler<ErrorCode> for CodeHandler {
    fn display(value: &ErrorCode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}", value.0)
    }

    fn debug(value: &ErrorCode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(value, f)
    }
}

struct PathHandler;

impl DiagnosticHandler<&'static str> for PathHandler {
    fn display(value: &&'static str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(value)
    }
}

#[test]
fn test_heterogeneous_collection() {
    let diagnostics = vec![
        RawDiagnostic::new::<ErrorCode, CodeHandler>(ErrorCode(5)),
        RawDiagnostic::new::<&'static str, PathHandler>("/etc/spire.conf"),
    ];

    assert_eq!(diagnostics[0].value_type_id(), TypeId::of::<ErrorCode>());
    assert_eq!(diagnostics[1].value_type_id(), TypeId::of::<&'static str>());

    let rendered: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["code 5", "/etc/spire.conf"]);

    assert_eq!(format!("{:?}", diagnostics[0]), "ErrorCode(5)");
    assert_eq!(format!("{:?}", diagnostics[1]), "/etc/spire.conf");
}

#[test]
fn test_clones_survive_original() {
    let clones: Vec<RawDiagnostic> = {
        let original = RawDiagnostic::new::<ErrorCode, CodeHandler>(ErrorCode(87));
        (0..3).map(|_| original.clone()).collect()
    };

    for clone in &clones {
        assert_eq!(clone.downcast::<ErrorCode>(), Some(&ErrorCode(87)));
        assert!(clone.downcast::<i32>().is_none());
    }
}

#[test]
fn test_diagnostics_cross_threads() {
    let diagnostic = RawDiagnostic::new::<ErrorCode, CodeHandler>(ErrorCode(2));
    let handle = std::thread::spawn(move || diagnostic.to_string());
    assert_eq!(handle.join().unwrap(), "code 2");
}

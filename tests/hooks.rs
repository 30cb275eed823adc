//! Hooks are process-global, so everything runs in one test.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use spire_error::{
    diagnostics::Diagnostics,
    hooks::{CreationHook, Hooks, builtin_hooks::location::CreatedAt},
    prelude::*,
};

diagnostic_key! {
    /// Name of the service raising the exception.
    pub enum Service: &'static str;

    /// Number of exceptions created before this one.
    pub enum Sequence: usize;
}

struct CountCreated(Arc<AtomicUsize>);

impl CreationHook for CountCreated {
    fn on_creation(&self, diagnostics: &mut Diagnostics) {
        let count = self.0.fetch_add(1, Ordering::SeqCst);
        diagnostics.insert::<Sequence>(count);
    }
}

const CHECK_LINE: u32 = line!() + 2;
fn failing_check() -> Result<(), RuntimeError> {
    check!(RuntimeError, 2 + 2 == 5);
    Ok(())
}

#[test]
fn test_hook_lifecycle() {
    // Defaults: location only
    let error = DataError::new("default hooks");
    let line = line!() - 1;
    let location = error.diagnostic::<CreatedAt>().unwrap();
    assert_eq!(location.file, file!());
    assert_eq!(location.line, line);
    assert_eq!(error.diagnostics().len(), 1);

    // Collector and creation hook, in registration order
    let created = Arc::new(AtomicUsize::new(0));
    let hooks = Hooks::new_without_locations()
        .diagnostic_collector::<Service, _>(|| "billing")
        .creation_hook(CountCreated(created.clone()));
    assert_eq!(hooks.len(), 2);
    hooks.install().unwrap();

    let error = failing_check().unwrap_err();
    assert_eq!(error.describe(), "Assert failed: 2 + 2 == 5");
    assert_eq!(error.diagnostic::<Service>(), Some(&"billing"));
    assert_eq!(error.diagnostic::<Sequence>(), Some(&0));
    assert!(error.diagnostic::<CreatedAt>().is_none());
    assert_eq!(created.load(Ordering::SeqCst), 1);

    // Hooks never change the construction message
    let error = DataError::new("bad header");
    assert_eq!(error.describe(), "bad header");
    assert_eq!(error.diagnostic::<Sequence>(), Some(&1));
    let error = DataError::from_args(format_args!("bad {}", "footer"));
    assert_eq!(error.describe(), "bad footer");
    assert_eq!(created.load(Ordering::SeqCst), 3);

    // Cloning does not re-run hooks
    let _copy = error.clone();
    assert_eq!(created.load(Ordering::SeqCst), 3);

    // A second install is rejected and hands the hooks back
    let rejected = Hooks::new().install().unwrap_err();
    assert_eq!(rejected.0.len(), 1);
    assert_eq!(rejected.to_string(), "hooks are already installed globally");

    // Replace swaps in the new hooks
    let previous = Hooks::new().replace().unwrap();
    assert_eq!(previous.len(), 2);
    let error = failing_check().unwrap_err();
    assert_eq!(error.describe(), "Assert failed: 2 + 2 == 5");
    let location = error.diagnostic::<CreatedAt>().unwrap();
    assert_eq!(location.file, file!());
    assert_eq!(location.line, CHECK_LINE);
    assert!(error.diagnostic::<Service>().is_none());

    // Uninstall restores the defaults
    assert_eq!(Hooks::uninstall().unwrap().len(), 1);
    assert!(Hooks::uninstall().is_none());
    let error = SystemError::new("defaults again");
    assert!(error.diagnostic::<CreatedAt>().is_some());
    assert_eq!(created.load(Ordering::SeqCst), 3);
}

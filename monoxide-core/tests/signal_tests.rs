// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::{PipelineError, Signal};

#[test]
fn test_map_only_touches_values() {
    assert_eq!(Signal::Value(2).map(|v| v * 10), Signal::Value(20));
    assert_eq!(Signal::<i32>::Empty.map(|v| v * 10), Signal::Empty);
    assert_eq!(Signal::<i32>::Cancelled.map(|v| v * 10), Signal::Cancelled);
    assert!(Signal::<i32>::Error(PipelineError::NoSuchElement)
        .map(|v| v * 10)
        .is_error());
}

#[test]
fn test_and_then_chains_values() {
    let signal = Signal::Value(3).and_then(|v| {
        if v > 2 {
            Signal::Empty
        } else {
            Signal::Value(v)
        }
    });

    assert!(signal.is_empty());
}

#[test]
fn test_errors_are_never_equal() {
    let a = Signal::<i32>::Error(PipelineError::NoSuchElement);
    let b = Signal::<i32>::Error(PipelineError::NoSuchElement);

    assert_ne!(a, b);
    assert_ne!(a, a.clone());
}

#[test]
fn test_into_result() {
    assert_eq!(Signal::Value("v").into_result().unwrap(), Some("v"));
    assert_eq!(Signal::<&str>::Empty.into_result().unwrap(), None);
    assert!(Signal::<&str>::Cancelled
        .into_result()
        .unwrap_err()
        .is_cancelled());
}

#[test]
fn test_into_non_value_splits_values_out() {
    assert_eq!(Signal::Value(7).into_non_value::<String>().unwrap_err(), 7);
    assert!(Signal::<i32>::Empty
        .into_non_value::<String>()
        .unwrap()
        .is_empty());
}

#[test]
#[should_panic(expected = "on an `Empty` signal")]
fn test_unwrap_panics_on_empty() {
    Signal::<i32>::Empty.unwrap();
}

//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use ferrous_inject::{implements, Injected};
use std::sync::atomic::{AtomicI32, Ordering};

/// Bound trait used across the tests.
pub trait Gauge: Send + Sync {
    fn value(&self) -> i32;
    fn value2(&self) -> f64;
}

/// Plain reading with explicit values.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub value: i32,
    pub value2: f64,
}

impl Reading {
    pub fn new(value: i32, value2: f64) -> Self {
        Self { value, value2 }
    }
}

impl Gauge for Reading {
    fn value(&self) -> i32 {
        self.value
    }

    fn value2(&self) -> f64 {
        self.value2
    }
}

#[derive(Debug)]
pub struct Primary(Reading);

impl Primary {
    pub const VALUE: i32 = 1;
    pub const VALUE2: f64 = 3.25;
}

impl Default for Primary {
    fn default() -> Self {
        Self(Reading::new(Self::VALUE, Self::VALUE2))
    }
}

impl Gauge for Primary {
    fn value(&self) -> i32 {
        self.0.value
    }

    fn value2(&self) -> f64 {
        self.0.value2
    }
}

#[derive(Debug)]
pub struct Secondary(Reading);

impl Secondary {
    pub const VALUE: i32 = 2;
    pub const VALUE2: f64 = 6.66;
}

impl Default for Secondary {
    fn default() -> Self {
        Self(Reading::new(Self::VALUE, Self::VALUE2))
    }
}

impl Gauge for Secondary {
    fn value(&self) -> i32 {
        self.0.value
    }

    fn value2(&self) -> f64 {
        self.0.value2
    }
}

static INC_VALUE: AtomicI32 = AtomicI32::new(0);
static INC_VALUE2: AtomicI32 = AtomicI32::new(0);

/// Each default instance bumps the first value by 1 and the second by 2.
#[derive(Debug)]
pub struct Incrementing(Reading);

impl Incrementing {
    pub fn init(value: i32, value2: i32) {
        INC_VALUE.store(value, Ordering::SeqCst);
        INC_VALUE2.store(value2, Ordering::SeqCst);
    }
}

impl Default for Incrementing {
    fn default() -> Self {
        let value = INC_VALUE.fetch_add(1, Ordering::SeqCst) + 1;
        let value2 = INC_VALUE2.fetch_add(2, Ordering::SeqCst) + 2;
        Self(Reading::new(value, f64::from(value2)))
    }
}

impl Gauge for Incrementing {
    fn value(&self) -> i32 {
        self.0.value
    }

    fn value2(&self) -> f64 {
        self.0.value2
    }
}

implements!(Reading, Primary, Secondary, Incrementing => dyn Gauge);

/// Declares a fresh handle and checks what it resolves to.
pub fn check_gauge(value: i32, value2: f64) {
    let gauge: Injected<dyn Gauge> = Injected::new();
    assert_eq!(gauge.value(), value);
    assert_eq!(gauge.value2(), value2);
}

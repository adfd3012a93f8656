//! Typed, thread-safe multicast events.
//!
//! A publisher owns an [`Event<S, A>`](Event). Subscribers register
//! handlers of the form `Fn(Option<&S>, &A)` and get a [`Handle`] back,
//! which removes that one handler later. [`Event::invoke`] runs every
//! registered handler synchronously on the calling thread, in no
//! particular order.
//!
//! ```
//! use multicast_event::Event;
//!
//! struct Thermometer;
//!
//! let changed: Event<Thermometer, f64> = Event::new();
//! let mut handle = changed.as_subscriber().add(|_, celsius| {
//!     println!("now {celsius:.1}");
//! });
//!
//! changed.invoke(Some(&Thermometer), &21.5).unwrap();
//! changed.remove(&mut handle);
//! assert!(changed.is_empty());
//! ```

use thiserror::Error;

#[macro_use]
pub (crate) mod logging;

mod key;

pub mod event;

pub use event::{
    Event,
    EventSubscriber,
    Handle,
    HandlerError,
    HandlerResult,
    InvokeError,
    InvokeResult
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invoke error: {0}")]
    Invoke(#[from] InvokeError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct TemperatureChanged {
        previous: f64,
        actual: f64,
    }

    struct Thermometer {
        temperature: f64,
        temperature_changed: Event<Thermometer, TemperatureChanged>,
    }

    impl Thermometer {
        fn new() -> Self {
            Self {
                temperature: 0.0,
                temperature_changed: Event::new(),
            }
        }

        fn subscribe(&self) -> EventSubscriber<Thermometer, TemperatureChanged> {
            self.temperature_changed.as_subscriber()
        }

        fn change_temperature(&mut self, temperature: f64) -> Result<()> {
            let args = TemperatureChanged {
                previous: self.temperature,
                actual: temperature,
            };
            self.temperature = temperature;
            self.temperature_changed.invoke(Some(&*self), &args)?;
            Ok(())
        }
    }

    #[test]
    fn test_thermometer_raises_event() {
        let mut thermometer = Thermometer::new();
        let raised = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&raised);
        thermometer.subscribe().add(move |sender: Option<&Thermometer>, args: &TemperatureChanged| {
            let reading = sender.map(|t| t.temperature);
            log.lock().push((reading, *args));
        });

        thermometer.change_temperature(5.0).unwrap();

        assert_eq!(
            *raised.lock(),
            vec![(Some(5.0), TemperatureChanged { previous: 0.0, actual: 5.0 })]
        );
    }

    #[test]
    fn test_two_subscribers_then_one() {
        let event: Event<(), &'static str> = Event::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let a = Arc::clone(&log);
        let mut h1 = event.add(move |_, _| a.lock().push("A"));
        let b = Arc::clone(&log);
        let _h2 = event.add(move |_, _| b.lock().push("B"));

        event.invoke(None, &"tick").unwrap();
        {
            let mut seen = log.lock().clone();
            seen.sort();
            assert_eq!(seen, vec!["A", "B"]);
        }

        event.remove(&mut h1);
        event.invoke(None, &"tick").unwrap();

        let seen = log.lock();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2], "B");
    }

    #[test]
    fn test_handler_failure_reaches_publisher() {
        let mut thermometer = Thermometer::new();
        thermometer.subscribe().try_add(|_, args: &TemperatureChanged| {
            if args.actual > 100.0 {
                Err(HandlerError::new("reading out of range"))
            } else {
                Ok(())
            }
        });

        assert!(thermometer.change_temperature(20.0).is_ok());
        match thermometer.change_temperature(250.0) {
            Err(Error::Invoke(InvokeError::Handler(e))) => {
                assert_eq!(e.to_string(), "reading out of range");
            }
            Ok(()) => panic!("handler failure was swallowed"),
        }
    }
}

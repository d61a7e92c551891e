//! Panics raised by the helpers point at the script line that called them

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::io;
use std::panic;
use std::sync::Mutex;

static LOCATIONS: Mutex<Vec<(String, u32)>> = Mutex::new(Vec::new());

struct Failing;

impl scr::Close for Failing {
    type Error = io::Error;

    fn close(self) -> io::Result<()> {
        Err(io::Error::other("close"))
    }
}

type Case = (&'static str, Box<dyn FnOnce()>);

fn case(name: &'static str, f: impl FnOnce() + 'static) -> Case {
    (name, Box::new(f))
}

/// Run `f` under `catch` and return where its last panic was raised
fn raised_at(f: impl FnOnce()) -> (String, u32) {
    LOCATIONS.lock().unwrap().clear();
    assert!(scr::catch(f).is_err());
    LOCATIONS.lock().unwrap().last().cloned().expect("a panic was raised")
}

// Single test: the panic hook is process wide.
#[test]
fn test_panic_location_is_caller() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        if let Some(location) = info.location() {
            LOCATIONS
                .lock()
                .unwrap()
                .push((location.file().to_string(), location.line()));
        }
    }));

    let (file, line) = raised_at(|| scr::must(Err::<(), _>(io::Error::other("must"))));
    assert_eq!(file, file!());
    assert_eq!(line, line!() - 2);

    let cases: Vec<Case> = vec![
        case("err", || scr::err(Err::<(), _>(io::Error::other("err")))),
        case("fail", || scr::fail("fail")),
        case("panicf", || scr::panicf!("{}", "panicf")),
        case("raise", || scr::raise(scr::Error::msg("raise"))),
        case("wrap", || scr::wrap("outer", || scr::fail("inner"))),
        case("wrapf", || scr::wrapf!("{}", "outer" => scr::fail("inner"))),
        case("close", || scr::close(Failing)),
        case("finish", || scr::closing(Failing).finish()),
        case("exec", || scr::exec("scr-no-such-program", ["x"])),
        case("look_path", || drop(scr::look_path("scr-no-such-program"))),
    ];
    for (name, f) in cases {
        let (file, _) = raised_at(f);
        assert_eq!(file, file!(), "{name} panicked inside the library");
    }

    panic::set_hook(previous);
}

//! Operator terminal UI.
//!
//! Single-key commands on the serial console let an operator inspect and
//! change the counter parameters while the system runs:
//!
//! ```text
//!   Select a setting to configure
//!   'i': installation (side)
//!   'o': orientation (landscape)
//!   ...
//! ```
//!
//! Every prompt/read/print sequence runs with the console muted, so status
//! lines from the sensing loop never interleave with an operator exchange
//! (they are dropped instead). Parsing and range checks belong to the
//! engine: the UI only passes text through and reports `OK` or `ERROR`.

use std::io::{Read, Write};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::app::ports::{PARAM_VALUE_MAX, ParamValue, ParameterPort};
use crate::console::SharedConsole;
use crate::drivers::task_pin::{self, Core};
use crate::error::SensingError;

/// Console thread priority (lowest; operator paced).
pub const CONSOLE_PRIORITY: u8 = 2;
const CONSOLE_STACK_KB: usize = 6;

/// Longest text value accepted at a prompt.
pub const LINE_MAX: usize = PARAM_VALUE_MAX - 1;

// ───────────────────────────────────────────────────────────────
// Parameter table
// ───────────────────────────────────────────────────────────────

/// How a parameter is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Pick one of a fixed list with keys `'1'`, `'2'`, ...
    Choice(&'static [&'static str]),
    /// Free text, ended by Enter.
    Text,
}

/// One configurable counter parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub key: u8,
    pub label: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
    pub kind: ParamKind,
}

pub const PARAMS: [ParamSpec; 8] = [
    ParamSpec {
        key: b'i',
        label: "installation",
        name: "radar_counter_installation",
        prompt: "Select counter installation:",
        kind: ParamKind::Choice(&["ceiling", "side"]),
    },
    ParamSpec {
        key: b'o',
        label: "orientation",
        name: "radar_counter_orientation",
        prompt: "Select counter orientation:",
        kind: ParamKind::Choice(&["landscape", "portrait"]),
    },
    ParamSpec {
        key: b'h',
        label: "ceiling height",
        name: "radar_counter_ceiling_height",
        prompt: "Enter counter ceiling height [0.0-3.0]m, press enter",
        kind: ParamKind::Text,
    },
    ParamSpec {
        key: b'w',
        label: "entrance width",
        name: "radar_counter_entrance_width",
        prompt: "Enter counter entrance width [0.0-3.0]m, press enter",
        kind: ParamKind::Text,
    },
    ParamSpec {
        key: b's',
        label: "sensitivity",
        name: "radar_counter_sensitivity",
        prompt: "Set sensitivity: [0.0 - 1.0]",
        kind: ParamKind::Text,
    },
    ParamSpec {
        key: b't',
        label: "traffic light zone",
        name: "radar_counter_traffic_light_zone",
        prompt: "Enter counter traffic light zone [0.0-1.0]m, press enter",
        kind: ParamKind::Text,
    },
    ParamSpec {
        key: b'r',
        label: "reverse",
        name: "radar_counter_reverse",
        prompt: "Select counter reverse:",
        kind: ParamKind::Choice(&["true", "false"]),
    },
    ParamSpec {
        key: b'm',
        label: "min person height",
        name: "radar_counter_min_person_height",
        prompt: "Enter counter min person height [0.0-2.0]m, press enter",
        kind: ParamKind::Text,
    },
];

/// Parameter bound to a command key.
pub fn param_for_key(key: u8) -> Option<&'static ParamSpec> {
    PARAMS.iter().find(|p| p.key == key)
}

// ───────────────────────────────────────────────────────────────
// Input
// ───────────────────────────────────────────────────────────────

/// Blocking byte source behind the console (UART RX, stdin).
pub trait ConsoleInput {
    /// Next byte, or `None` once the input is closed.
    fn read_byte(&mut self) -> Option<u8>;
}

/// [`ConsoleInput`] over any [`Read`].
pub struct ByteReader<R>(R);

impl<R: Read> ByteReader<R> {
    pub fn new(reader: R) -> Self {
        Self(reader)
    }
}

impl<R: Read> ConsoleInput for ByteReader<R> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut b = [0u8; 1];
        loop {
            match self.0.read(&mut b) {
                Ok(0) => return None,
                Ok(_) => return Some(b[0]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!("console: input failed: {}", e);
                    return None;
                }
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Terminal UI
// ───────────────────────────────────────────────────────────────

/// Whether the command loop may go on reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    InputClosed,
}

/// Result of a choice prompt.
enum Selection {
    Chosen(&'static str),
    NotUpdated,
    InputClosed,
}

pub struct TerminalUi<I, P, W> {
    input: I,
    params: P,
    console: Arc<SharedConsole<W>>,
}

impl<I, P, W> TerminalUi<I, P, W>
where
    I: ConsoleInput,
    P: ParameterPort,
    W: Write,
{
    pub fn new(input: I, params: P, console: Arc<SharedConsole<W>>) -> Self {
        Self {
            input,
            params,
            console,
        }
    }

    /// Serve commands until the input closes.
    pub fn run(&mut self) -> std::io::Result<()> {
        self.print_menu()?;
        while let Some(key) = self.input.read_byte() {
            let step = match key {
                b'?' => {
                    self.print_menu()?;
                    Step::Continue
                }
                k => match param_for_key(k) {
                    Some(spec) => self.configure(spec)?,
                    None => {
                        self.print_hint()?;
                        Step::Continue
                    }
                },
            };
            if step == Step::InputClosed {
                break;
            }
        }
        let mut out = self.console.mute();
        write!(out, "Exiting terminal ui\r\n")?;
        out.flush()?;
        info!("console: input closed");
        Ok(())
    }

    /// Print every parameter with its current value.
    pub fn print_menu(&mut self) -> std::io::Result<()> {
        let mut out = self.console.mute();
        write!(out, "Select a setting to configure\r\n")?;
        for spec in &PARAMS {
            match self.params.get_parameter(spec.name) {
                Ok(value) => write!(out, "'{}': {} ({})\r\n", char::from(spec.key), spec.label, value)?,
                Err(_) => write!(out, "'{}': {} (n/a)\r\n", char::from(spec.key), spec.label)?,
            }
        }
        write!(out, "\r\n")?;
        out.flush()
    }

    fn print_hint(&mut self) -> std::io::Result<()> {
        let mut out = self.console.mute();
        write!(out, "Press '?' to list all radar counter settings\r\n")?;
        out.flush()
    }

    fn configure(&mut self, spec: &ParamSpec) -> std::io::Result<Step> {
        let mut out = self.console.mute();
        write!(out, "{}\r\n", spec.prompt)?;

        let value = match spec.kind {
            ParamKind::Choice(choices) => match select(&mut self.input, &mut *out, choices)? {
                Selection::Chosen(choice) => {
                    let mut v = ParamValue::new();
                    let _ = v.push_str(choice);
                    v
                }
                Selection::NotUpdated => return Ok(Step::Continue),
                Selection::InputClosed => return Ok(Step::InputClosed),
            },
            ParamKind::Text => match read_line(&mut self.input, &mut *out)? {
                Some(line) => line,
                None => return Ok(Step::InputClosed),
            },
        };

        let result = self.params.set_parameter(spec.name, &value);
        match result {
            Ok(()) => info!("console: {} = {}", spec.name, value),
            Err(e) => debug!("console: {} rejected {:?}: {}", spec.name, value.as_str(), e),
        }
        print_result(&mut *out, result)?;
        out.flush()?;
        Ok(Step::Continue)
    }
}

impl<I, P, W> TerminalUi<I, P, W>
where
    I: ConsoleInput + Send + 'static,
    P: ParameterPort + Send + 'static,
    W: Write + Send + 'static,
{
    /// Spawn the console thread. It ends when the input closes.
    pub fn spawn(mut self) -> std::io::Result<std::thread::JoinHandle<()>> {
        task_pin::spawn_on_core(
            Core::Pro,
            CONSOLE_PRIORITY,
            CONSOLE_STACK_KB,
            "console\0",
            move || {
                if let Err(e) = self.run() {
                    warn!("console: output failed: {}", e);
                }
            },
        )
    }
}

/// List `choices` as `'1'`, `'2'`, ... and read one non-whitespace key.
fn select<I: ConsoleInput, W: Write + ?Sized>(
    input: &mut I,
    out: &mut W,
    choices: &'static [&'static str],
) -> std::io::Result<Selection> {
    for (i, choice) in choices.iter().enumerate() {
        write!(out, "\t'{}': {}\r\n", i + 1, choice)?;
    }
    out.flush()?;

    let key = loop {
        match input.read_byte() {
            None => return Ok(Selection::InputClosed),
            Some(b) if b.is_ascii_whitespace() => {}
            Some(b) => break b,
        }
    };

    let picked = key
        .checked_sub(b'1')
        .map(usize::from)
        .and_then(|i| choices.get(i));
    match picked {
        Some(choice) => {
            write!(out, "selected '{}': {}\r\n", char::from(key), choice)?;
            Ok(Selection::Chosen(choice))
        }
        None => {
            write!(out, "not updated\r\n")?;
            Ok(Selection::NotUpdated)
        }
    }
}

/// Read one line with echo. Whitespace and non-printable bytes are
/// dropped, CR or LF ends the line, at most [`LINE_MAX`] characters are
/// kept. `None` if the input closed.
fn read_line<I: ConsoleInput, W: Write + ?Sized>(
    input: &mut I,
    out: &mut W,
) -> std::io::Result<Option<ParamValue>> {
    let mut line = ParamValue::new();
    loop {
        let Some(b) = input.read_byte() else {
            return Ok(None);
        };
        if b == b'\r' || b == b'\n' {
            break;
        }
        out.write_all(&[b])?;
        out.flush()?;
        if !b.is_ascii_graphic() {
            continue;
        }
        if line.push(char::from(b)).is_err() || line.len() >= LINE_MAX {
            break;
        }
    }
    write!(out, "\r\n")?;
    Ok(Some(line))
}

fn print_result<W: Write + ?Sized>(
    out: &mut W,
    result: Result<(), SensingError>,
) -> std::io::Result<()> {
    match result {
        Ok(()) => write!(out, "OK\r\n"),
        Err(_) => write!(out, "ERROR\r\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Script(VecDeque<u8>);

    impl Script {
        fn new(bytes: &[u8]) -> Self {
            Self(bytes.iter().copied().collect())
        }
    }

    impl ConsoleInput for Script {
        fn read_byte(&mut self) -> Option<u8> {
            self.0.pop_front()
        }
    }

    #[derive(Default)]
    struct Params {
        set: Vec<(String, String)>,
        reject: bool,
    }

    impl ParameterPort for Params {
        fn get_parameter(&self, key: &str) -> Result<ParamValue, SensingError> {
            if key == "radar_counter_reverse" {
                return Err(SensingError::UnknownParameter);
            }
            let mut v = ParamValue::new();
            let _ = v.push_str("x");
            Ok(v)
        }

        fn set_parameter(&mut self, key: &str, value: &str) -> Result<(), SensingError> {
            if self.reject {
                return Err(SensingError::InvalidValue);
            }
            self.set.push((key.to_owned(), value.to_owned()));
            Ok(())
        }
    }

    fn run(input: &[u8], params: Params) -> (String, Params) {
        let console = Arc::new(SharedConsole::new(Vec::<u8>::new()));
        let mut ui = TerminalUi::new(Script::new(input), params, console.clone());
        ui.run().unwrap();
        let TerminalUi { params, console: ui_console, .. } = ui;
        drop(ui_console);
        let out = Arc::try_unwrap(console).ok().unwrap().into_inner();
        (String::from_utf8(out).unwrap(), params)
    }

    #[test]
    fn menu_lists_values_and_na() {
        let (out, _) = run(b"", Params::default());
        assert!(out.starts_with("Select a setting to configure\r\n'i': installation (x)\r\n"));
        assert!(out.contains("'r': reverse (n/a)\r\n"));
        assert!(out.ends_with("\r\nExiting terminal ui\r\n"));
    }

    #[test]
    fn choice_selection_sets_parameter() {
        let (out, params) = run(b"i 1", Params::default());
        assert!(out.contains("Select counter installation:\r\n\t'1': ceiling\r\n\t'2': side\r\n"));
        assert!(out.contains("selected '1': ceiling\r\nOK\r\n"));
        assert_eq!(
            params.set,
            vec![("radar_counter_installation".into(), "ceiling".into())]
        );
    }

    #[test]
    fn out_of_range_choice_is_not_updated() {
        let (out, params) = run(b"o9", Params::default());
        assert!(out.contains("not updated\r\n"));
        assert!(!out.contains("OK"));
        assert!(params.set.is_empty());
    }

    #[test]
    fn text_entry_drops_whitespace_and_echoes() {
        let (out, params) = run(b"h2 .5\r", Params::default());
        assert!(out.contains("Enter counter ceiling height [0.0-3.0]m, press enter\r\n2 .5\r\nOK\r\n"));
        assert_eq!(
            params.set,
            vec![("radar_counter_ceiling_height".into(), "2.5".into())]
        );
    }

    #[test]
    fn rejected_value_prints_error() {
        let params = Params {
            reject: true,
            ..Params::default()
        };
        let (out, _) = run(b"s7\n", params);
        assert!(out.contains("Set sensitivity: [0.0 - 1.0]\r\n"));
        assert!(out.contains("ERROR\r\n"));
    }

    #[test]
    fn every_unknown_key_prints_hint() {
        let (out, _) = run(b"\r\n z", Params::default());
        assert_eq!(
            out.matches("Press '?' to list all radar counter settings\r\n").count(),
            4
        );
    }

    #[test]
    fn long_line_is_capped() {
        let mut input = vec![b'w'];
        input.extend(std::iter::repeat_n(b'9', 400));
        input.push(b'\r');
        let (_, params) = run(&input, Params::default());
        assert_eq!(params.set[0].1.len(), LINE_MAX);
    }

    #[test]
    fn input_closed_mid_prompt_exits() {
        let (out, params) = run(b"m1.", Params::default());
        assert!(params.set.is_empty());
        assert!(out.ends_with("Exiting terminal ui\r\n"));
    }
}

//! QASM boundary: parse and emit the OpenQASM 2.0 subset used by the corpus.
//!
//! Accepted statements (each terminated by `;`, any number per line):
//!
//! ```text
//! OPENQASM 2.0;
//! include "qelib1.inc";
//! qreg q[3];
//! h q[0];
//! t q[1];
//! tdg q[2];
//! cx q[0],q[1];
//! ```
//!
//! `//` starts a comment that runs to the end of the line. Exactly one `qreg`
//! is allowed and it must precede the first gate. Anything else is rejected
//! with the 1-based line number of the offending statement.

use crate::carrier::circuit::{Circuit, CircuitError};
use crate::carrier::gate::Gate;

/// Typed failure for QASM parsing. Fail-closed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QasmError {
    /// A statement could not be understood.
    #[error("line {line}: {detail}")]
    Syntax { line: usize, detail: String },
    /// The program never declared a register.
    #[error("no qreg declaration")]
    MissingRegister,
    /// The parsed gates do not form a valid circuit.
    #[error("invalid circuit: {0}")]
    Circuit(#[from] CircuitError),
}

fn syntax(line: usize, detail: impl Into<String>) -> QasmError {
    QasmError::Syntax {
        line,
        detail: detail.into(),
    }
}

/// Parse QASM text into a [`Circuit`].
///
/// # Errors
///
/// Returns [`QasmError`] for unsupported statements, malformed operands, a
/// missing or repeated `qreg`, or gates that address qubits outside it.
pub fn parse_qasm(text: &str) -> Result<Circuit, QasmError> {
    let mut register: Option<(String, u32)> = None;
    let mut gates = Vec::new();

    for (line_idx, raw_line) in text.lines().enumerate() {
        let line = line_idx + 1;
        let code = raw_line.split("//").next().unwrap_or_default();
        for statement in code.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (keyword, rest) = statement
                .split_once(char::is_whitespace)
                .map_or((statement, ""), |(k, r)| (k, r.trim()));
            match keyword {
                "OPENQASM" => {
                    if rest != "2.0" {
                        return Err(syntax(line, format!("unsupported version {rest:?}")));
                    }
                }
                "include" => {}
                "qreg" => {
                    if register.is_some() {
                        return Err(syntax(line, "more than one qreg"));
                    }
                    let (name, size) = parse_indexed(rest).ok_or_else(|| {
                        syntax(line, format!("malformed register declaration {rest:?}"))
                    })?;
                    register = Some((name.to_string(), size));
                }
                "h" | "t" | "tdg" | "cx" => {
                    let Some((reg_name, _)) = register.as_ref() else {
                        return Err(syntax(line, "gate before qreg"));
                    };
                    let mut qubits = Vec::with_capacity(2);
                    for operand in rest.split(',').map(str::trim) {
                        let (name, index) = parse_indexed(operand).ok_or_else(|| {
                            syntax(line, format!("malformed operand {operand:?}"))
                        })?;
                        if name != reg_name {
                            return Err(syntax(line, format!("unknown register {name:?}")));
                        }
                        qubits.push(index);
                    }
                    gates.push(build_gate(keyword, &qubits).ok_or_else(|| {
                        syntax(
                            line,
                            format!("{keyword} does not take {} operand(s)", qubits.len()),
                        )
                    })?);
                }
                other => return Err(syntax(line, format!("unsupported statement {other:?}"))),
            }
        }
    }

    let (_, qubit_count) = register.ok_or(QasmError::MissingRegister)?;
    Ok(Circuit::new(qubit_count, gates)?)
}

/// Parse `name[index]`.
fn parse_indexed(s: &str) -> Option<(&str, u32)> {
    let (name, rest) = s.split_once('[')?;
    let index = rest.strip_suffix(']')?.trim().parse().ok()?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, index))
}

fn build_gate(keyword: &str, qubits: &[u32]) -> Option<Gate> {
    match (keyword, qubits) {
        ("h", &[q]) => Some(Gate::H(q)),
        ("t", &[q]) => Some(Gate::T(q)),
        ("tdg", &[q]) => Some(Gate::Tdg(q)),
        ("cx", &[control, target]) => Some(Gate::Cx { control, target }),
        _ => None,
    }
}

/// Emit a circuit as QASM text (register named `q`, one gate per line).
#[must_use]
pub fn to_qasm(circuit: &Circuit) -> String {
    let mut out = String::from("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n");
    out.push_str(&format!("qreg q[{}];\n", circuit.qubit_count()));
    for gate in circuit.gates() {
        out.push_str(&format!("{gate};\n"));
    }
    out
}

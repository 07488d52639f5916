//! PyO3 bindings for the automaton pipeline.
//!
//! Built with the `python` feature; `extension-module` additionally links
//! the crate as an importable `automin` module.

use crate::automaton::{Automaton, decode_set, minimize, subset_construction};
use crate::error::Error;
use crate::text;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PySet;

fn to_py_err(err: Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// A finite automaton with string-labelled states and symbols.
#[pyclass(name = "Automaton", module = "automin")]
#[derive(Clone)]
pub struct PyAutomaton {
    inner: Automaton,
}

impl From<Automaton> for PyAutomaton {
    fn from(inner: Automaton) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyAutomaton {
    #[new]
    #[pyo3(signature = (states, alphabet, start, final_states, transitions))]
    fn new(
        states: Vec<String>,
        alphabet: Vec<String>,
        start: String,
        final_states: Vec<String>,
        transitions: Vec<(String, String, String)>,
    ) -> Self {
        let mut builder = Automaton::builder()
            .states(states)
            .alphabet(alphabet)
            .start(start)
            .final_states(final_states);
        for (src, sym, dst) in transitions {
            builder = builder.transition(src, sym, dst);
        }
        builder.build().into()
    }

    /// Parse the textual automaton format.
    #[staticmethod]
    fn parse(source: &str) -> PyResult<Self> {
        text::parse(source).map(Self::from).map_err(to_py_err)
    }

    fn validate(&self) -> bool {
        self.inner.validate()
    }

    /// Raise `ValueError` naming the first violated invariant.
    fn check(&self) -> PyResult<()> {
        self.inner
            .check()
            .map_err(|err| to_py_err(Error::Structural(err)))
    }

    fn is_deterministic(&self) -> bool {
        self.inner.is_deterministic()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn accepts(&self, word: Vec<String>) -> bool {
        self.inner.accepts(&word)
    }

    /// Convert to a DFA via subset construction.
    fn determinize(&self) -> PyResult<Self> {
        subset_construction(&self.inner)
            .map(Self::from)
            .map_err(to_py_err)
    }

    /// Minimize a DFA (returns a new automaton).
    fn minimize(&self) -> PyResult<Self> {
        minimize(&self.inner).map(Self::from).map_err(to_py_err)
    }

    /// The member labels a constructed state stands for, if it is a set label.
    fn members(&self, state: &str) -> Option<Vec<String>> {
        decode_set(state)
    }

    #[getter]
    fn states(&self) -> Vec<String> {
        self.inner.states().to_vec()
    }

    #[getter]
    fn alphabet(&self) -> Vec<String> {
        self.inner.alphabet().to_vec()
    }

    #[getter]
    fn start(&self) -> String {
        self.inner.start().to_string()
    }

    #[getter]
    fn final_states(&self, py: Python<'_>) -> PyResult<Py<PySet>> {
        let set = PySet::empty(py)?;
        for state in self.inner.final_states() {
            set.add(state)?;
        }
        Ok(set.unbind())
    }

    #[getter]
    fn transitions(&self) -> Vec<(String, String, String)> {
        self.inner
            .transitions()
            .map(|(src, sym, dst)| (src.to_string(), sym.to_string(), dst.to_string()))
            .collect()
    }

    fn to_json(&self) -> PyResult<String> {
        text::to_json(&self.inner).map_err(to_py_err)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, symbols={}, transitions={})",
            self.inner.states().len(),
            self.inner.alphabet().len(),
            self.inner.transition_count()
        )
    }
}

/// Determinize and minimize `nfa`, returning `(dfa, minimized)`.
#[pyfunction]
fn determinize_and_minimize(nfa: PyRef<'_, PyAutomaton>) -> PyResult<(PyAutomaton, PyAutomaton)> {
    let pipeline = crate::determinize_and_minimize(&nfa.inner).map_err(to_py_err)?;
    Ok((pipeline.dfa.into(), pipeline.minimized.into()))
}

#[pymodule]
fn automin(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAutomaton>()?;
    m.add_function(wrap_pyfunction!(determinize_and_minimize, m)?)?;
    Ok(())
}

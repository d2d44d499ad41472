use crate::options::Options;
use crate::programs::approval;
use anyhow::Context;
use itertools::Itertools;
use log::{debug, info};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use teal_backend::{compile_with_options, CompileOptions};
use teal_ir::evaluation::{evaluate, GlobalState, Invocation, Outcome};
use teal_ir::OnComplete;

/// Application id the simulated deployment is assigned
const SIMULATED_APP_ID: u64 = 1;

/// Build and compile the program selected by `options`
pub fn compile(options: &Options) -> anyhow::Result<String> {
    let program = options.program;
    let expr = program
        .build()
        .with_context(|| format!("failed to build {} program", program))?;

    let compile_options = CompileOptions::new(program.mode(), options.target_version());
    debug!("compile options: {:?}", compile_options);

    compile_with_options(&expr, &compile_options)
        .with_context(|| format!("failed to compile {} program", program))
}

/// Print `teal` to stdout, or write it to `output_path`
pub fn emit(teal: &str, output_path: Option<&Path>) -> anyhow::Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, format!("{}\n", teal))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", teal),
    }
    Ok(())
}

/// Outcomes of deploying the approval program and then calling it once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub deployment: Outcome,
    pub call: Outcome,
    pub state: GlobalState,
}

impl Display for SimulationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "deployment: {}", self.deployment)?;
        writeln!(f, "no-op call: {}", self.call)?;
        let entries = self
            .state
            .iter()
            .map(|(key, value)| format!("{}={}", String::from_utf8_lossy(key), value))
            .join(", ");
        write!(f, "global state: {{{}}}", entries)
    }
}

/// Deploy the approval program with `number` as its argument, then make a no-op call
pub fn simulate(number: u64) -> anyhow::Result<SimulationReport> {
    let program = approval::build_program().context("failed to build approval program")?;
    let mut state = GlobalState::new();

    let deployment = evaluate(
        &program,
        &Invocation::create(vec![number.to_be_bytes().to_vec()]),
        &mut state,
    );
    info!("deployment with {}: {}", number, deployment);

    let call = evaluate(
        &program,
        &Invocation::call(SIMULATED_APP_ID, OnComplete::NoOp),
        &mut state,
    );
    info!("no-op call: {}", call);

    Ok(SimulationReport {
        deployment,
        call,
        state,
    })
}

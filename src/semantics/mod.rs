//! Semantic analysis over the parsed tree.
//!
//! Each pass is a [`Visitor`] that annotates the tree in place and collects
//! diagnostics. The passes run in a fixed order because later passes rely on
//! what earlier ones established:
//!
//! - Name resolution links identifiers, calls and named types, and rewrites
//!   bare routine names into calls
//! - Call validation checks argument counts and types
//! - Array length checks require a length outside parameter position
//! - Constant propagation marks compile-time expressions
//! - Typing fills in expression types and binds record members
//! - Return path checks require a `return` on every path of a typed routine

use std::fmt::Display;

use log::debug;

use crate::{
    ast::{ast::Ast, visitor::Visitor},
    errors::errors::Error,
    Options,
};

pub mod array_lengths;
pub mod call_checker;
pub mod constants;
pub mod resolver;
pub mod returns;
pub mod typing;


/// Pipeline stages, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Parsing,
    NameResolution,
    CallValidation,
    ArrayLengths,
    Constants,
    Typing,
    ReturnPaths,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Parsing => "parsing",
            Stage::NameResolution => "name resolution",
            Stage::CallValidation => "call validation",
            Stage::ArrayLengths => "array length check",
            Stage::Constants => "constant propagation",
            Stage::Typing => "typing",
            Stage::ReturnPaths => "return path check",
        };
        write!(f, "{}", name)
    }
}

/// A visitor that runs as one stage of the pipeline.
pub trait Pass: Visitor {
    const STAGE: Stage;

    /// Diagnostics collected while visiting.
    fn into_errors(self) -> Vec<Error>;
}

/// Runs `pass` over the whole program and returns its diagnostics.
pub fn run_pass<P: Pass>(ast: &mut Ast, mut pass: P) -> Vec<Error> {
    debug!("{} started", P::STAGE);
    pass.visit_program(ast);
    let errors = pass.into_errors();
    debug!("{} finished with {} error(s)", P::STAGE, errors.len());
    errors
}

type StageFn = fn(&mut Ast) -> Vec<Error>;

/// Runs every semantic pass in order.
///
/// Name resolution errors always stop the pipeline, since the remaining
/// passes rely on resolved links. Errors of later stages stop it only when
/// [`Options::halt_on_error`] is set.
///
/// # Returns
///
/// The diagnostics of every stage that ran, and the stage that stopped the
/// pipeline, if any.
pub fn analyze(ast: &mut Ast, options: &Options) -> (Vec<Error>, Option<Stage>) {
    let resolution_errors = run_pass(ast, resolver::Resolver::new());
    if !resolution_errors.is_empty() {
        return (resolution_errors, Some(Stage::NameResolution));
    }

    let stages: [(Stage, StageFn); 5] = [
        (Stage::CallValidation, |ast| {
            run_pass(ast, call_checker::CallChecker::new())
        }),
        (Stage::ArrayLengths, |ast| {
            run_pass(ast, array_lengths::ArrayLengths::new())
        }),
        (Stage::Constants, |ast| run_pass(ast, constants::Constants::new())),
        (Stage::Typing, |ast| run_pass(ast, typing::Typing::new())),
        (Stage::ReturnPaths, |ast| run_pass(ast, returns::Returns::new())),
    ];

    let mut errors = vec![];
    for (stage, run) in stages {
        let stage_errors = run(ast);
        let failed = !stage_errors.is_empty();
        errors.extend(stage_errors);

        if failed && options.halt_on_error {
            return (errors, Some(stage));
        }
    }

    (errors, None)
}

//! Builtin command set
//!
//! Math commands turn their arguments into a [`Calculation`] and record it in
//! the history. History commands delegate to [`History`](crate::history::History).
//! [`register_builtins`] is the static registration table.

use std::path::PathBuf;

use super::{
    Arg, Command, CommandContext, CommandEntry, CommandError, Output, Registry, Signature,
};
use crate::calculation::Calculation;
use crate::operation::{Operation, OperationArity};
use rust_decimal::Decimal;

/// Register every builtin command
pub fn register_builtins(registry: &mut Registry) {
    for op in Operation::ALL {
        registry.register(op.name(), operation_entry(op));
    }

    registry.register(
        "display_history",
        CommandEntry::new(Signature::construct(0), "Show the calculation history", |_| {
            Ok(Box::new(DisplayHistoryCommand))
        }),
    );
    registry.register(
        "save_history",
        CommandEntry::new(
            Signature::construct_range(0, 1),
            "Save the history to a CSV file: save_history([path])",
            |args| Ok(Box::new(SaveHistoryCommand::new(path_arg(args)))),
        ),
    );
    registry.register(
        "load_history",
        CommandEntry::new(
            Signature::construct_range(0, 1),
            "Replace the history with a CSV file: load_history([path])",
            |args| Ok(Box::new(LoadHistoryCommand::new(path_arg(args)))),
        ),
    );
    registry.register(
        "clear_history",
        CommandEntry::new(Signature::construct(0), "Clear the calculation history", |_| {
            Ok(Box::new(ClearHistoryCommand))
        }),
    );
    registry.register(
        "last_calculation",
        CommandEntry::new(Signature::construct(0), "Show the most recent calculation", |_| {
            Ok(Box::new(LastCalculationCommand))
        }),
    );
    registry.register(
        "menu",
        CommandEntry::new(Signature::construct(0), "List available commands", |_| {
            Ok(Box::new(MenuCommand))
        }),
    );
}

/// Entry for a plain operation: binary ones take both operands at
/// construction, unary ones take their operand at execution.
pub fn operation_entry(operation: Operation) -> CommandEntry {
    match operation.arity() {
        OperationArity::Binary => CommandEntry::new(
            Signature::construct(2),
            operation.summary(),
            move |args| Ok(Box::new(BinaryCommand::from_args(operation, &args)?)),
        ),
        OperationArity::Unary => CommandEntry::new(
            Signature::operand(),
            operation.summary(),
            move |_| Ok(Box::new(UnaryCommand::new(operation))),
        ),
    }
}

/// Entry for a binary operation with its right operand fixed
pub fn bound_operation_entry(
    operation: Operation,
    operand: Decimal,
    summary: impl Into<String>,
) -> CommandEntry {
    CommandEntry::new(Signature::operand(), summary, move |_| {
        Ok(Box::new(BoundCommand::new(operation, operand)))
    })
}

/// Path as written on the command line, even when it looks like a number
fn path_arg(args: Vec<Arg>) -> Option<PathBuf> {
    args.first().map(|arg| PathBuf::from(arg.as_text()))
}

fn perform(ctx: &mut CommandContext<'_>, calculation: Calculation) -> Result<Output, CommandError> {
    let result = ctx.history.add_calculation(&calculation)?;
    tracing::info!(calculation = %calculation, result = %result, "calculated");
    Ok(Output::Number(result))
}

// ========================================
// Math commands
// ========================================

/// Binary operation with both operands supplied at construction
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryCommand {
    operation: Operation,
    a: Decimal,
    b: Decimal,
}

impl BinaryCommand {
    pub fn new(operation: Operation, a: Decimal, b: Decimal) -> Self {
        BinaryCommand { operation, a, b }
    }

    pub fn from_args(operation: Operation, args: &[Arg]) -> Result<Self, CommandError> {
        match args {
            [a, b] => Ok(BinaryCommand::new(
                operation,
                a.number_for(operation.name())?,
                b.number_for(operation.name())?,
            )),
            _ => Err(CommandError::Arity {
                command: operation.name().to_string(),
                expected: Signature::construct(2),
                got: args.len(),
            }),
        }
    }
}

impl Command for BinaryCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>, _operand: Option<Arg>) -> Result<Output, CommandError> {
        perform(ctx, Calculation::create(self.a, Some(self.b), self.operation))
    }
}

/// Unary operation receiving its operand at execution
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryCommand {
    operation: Operation,
}

impl UnaryCommand {
    pub fn new(operation: Operation) -> Self {
        UnaryCommand { operation }
    }
}

impl Command for UnaryCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>, operand: Option<Arg>) -> Result<Output, CommandError> {
        let name = self.operation.name();
        let a = operand
            .ok_or_else(|| CommandError::Arity {
                command: name.to_string(),
                expected: Signature::operand(),
                got: 0,
            })?
            .number_for(name)?;
        perform(ctx, Calculation::create(a, None, self.operation))
    }
}

/// Binary operation whose right operand is fixed, e.g. `half = divide(_, 2)`
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCommand {
    operation: Operation,
    operand: Decimal,
}

impl BoundCommand {
    pub fn new(operation: Operation, operand: Decimal) -> Self {
        BoundCommand { operation, operand }
    }
}

impl Command for BoundCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>, operand: Option<Arg>) -> Result<Output, CommandError> {
        let name = self.operation.name();
        let a = operand
            .ok_or_else(|| CommandError::Arity {
                command: name.to_string(),
                expected: Signature::operand(),
                got: 0,
            })?
            .number_for(name)?;
        perform(ctx, Calculation::create(a, Some(self.operand), self.operation))
    }
}

// ========================================
// History commands
// ========================================

pub struct DisplayHistoryCommand;

impl Command for DisplayHistoryCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>, _operand: Option<Arg>) -> Result<Output, CommandError> {
        Ok(Output::History(ctx.history.all().to_vec()))
    }
}

pub struct SaveHistoryCommand {
    path: Option<PathBuf>,
}

impl SaveHistoryCommand {
    pub fn new(path: Option<PathBuf>) -> Self {
        SaveHistoryCommand { path }
    }
}

impl Command for SaveHistoryCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>, _operand: Option<Arg>) -> Result<Output, CommandError> {
        let path = ctx.resolve_path(self.path.as_ref());
        ctx.history.save(&path)?;
        Ok(Output::Saved {
            path,
            count: ctx.history.len(),
        })
    }
}

pub struct LoadHistoryCommand {
    path: Option<PathBuf>,
}

impl LoadHistoryCommand {
    pub fn new(path: Option<PathBuf>) -> Self {
        LoadHistoryCommand { path }
    }
}

impl Command for LoadHistoryCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>, _operand: Option<Arg>) -> Result<Output, CommandError> {
        let path = ctx.resolve_path(self.path.as_ref());
        ctx.history.load(&path)?;
        Ok(Output::Loaded {
            path,
            count: ctx.history.len(),
        })
    }
}

pub struct ClearHistoryCommand;

impl Command for ClearHistoryCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>, _operand: Option<Arg>) -> Result<Output, CommandError> {
        ctx.history.clear();
        Ok(Output::Cleared)
    }
}

pub struct LastCalculationCommand;

impl Command for LastCalculationCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>, _operand: Option<Arg>) -> Result<Output, CommandError> {
        Ok(Output::Entry(ctx.history.last().cloned()))
    }
}

pub struct MenuCommand;

impl Command for MenuCommand {
    fn execute(&mut self, ctx: &mut CommandContext<'_>, _operand: Option<Arg>) -> Result<Output, CommandError> {
        Ok(Output::Commands(ctx.registry.infos()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{History, HistoryEntry};
    use std::path::Path;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn run(command: &mut dyn Command, history: &mut History, operand: Option<Arg>) -> Result<Output, CommandError> {
        let registry = Registry::with_builtins();
        let mut ctx = CommandContext {
            history,
            registry: &registry,
            default_history_file: Path::new("history.csv"),
        };
        command.execute(&mut ctx, operand)
    }

    #[test]
    fn test_binary_command_records_history() {
        let mut history = History::new();
        let mut cmd = BinaryCommand::new(Operation::Multiply, d("3"), d("7"));
        let out = run(&mut cmd, &mut history, None).unwrap();
        assert_eq!(out, Output::Number(d("21")));
        assert_eq!(history.all(), &[HistoryEntry::new("multiply", d("3"), Some(d("7")), d("21"))]);
    }

    #[test]
    fn test_binary_from_args_rejects_text() {
        let err = BinaryCommand::from_args(Operation::Add, &[Arg::number(d("1")), Arg::from("x")]).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArgument { ref command, .. } if command == "add"));
    }

    #[test]
    fn test_unary_command() {
        let mut history = History::new();
        let mut cmd = UnaryCommand::new(Operation::Sqrt);
        let out = run(&mut cmd, &mut history, Some(Arg::number(d("9")))).unwrap();
        assert_eq!(out, Output::Number(d("3")));
        assert_eq!(history.last(), Some(&HistoryEntry::new("sqrt", d("9"), None, d("3"))));
    }

    #[test]
    fn test_unary_command_without_operand() {
        let mut history = History::new();
        let err = run(&mut UnaryCommand::new(Operation::Cos), &mut history, None).unwrap_err();
        assert!(matches!(err, CommandError::Arity { got: 0, .. }));
    }

    #[test]
    fn test_bound_command() {
        let mut history = History::new();
        let mut cmd = BoundCommand::new(Operation::Divide, d("2"));
        let out = run(&mut cmd, &mut history, Some(Arg::number(d("9")))).unwrap();
        assert_eq!(out, Output::Number(d("4.5")));
        assert_eq!(history.last(), Some(&HistoryEntry::new("divide", d("9"), Some(d("2")), d("4.5"))));
    }

    #[test]
    fn test_domain_error_not_recorded() {
        let mut history = History::new();
        let err = run(&mut BinaryCommand::new(Operation::Divide, d("10"), d("0")), &mut history, None).unwrap_err();
        assert_eq!(err.to_string(), "Cannot divide by zero");
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_commands() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.csv");
        let mut history = History::new();
        history.add(HistoryEntry::new("add", d("5"), Some(d("3")), d("8")));

        let out = run(&mut SaveHistoryCommand::new(Some(path.clone())), &mut history, None).unwrap();
        assert_eq!(out, Output::Saved { path: path.clone(), count: 1 });

        assert_eq!(run(&mut ClearHistoryCommand, &mut history, None).unwrap(), Output::Cleared);
        assert_eq!(run(&mut LastCalculationCommand, &mut history, None).unwrap(), Output::Entry(None));

        let out = run(&mut LoadHistoryCommand::new(Some(path.clone())), &mut history, None).unwrap();
        assert_eq!(out, Output::Loaded { path, count: 1 });

        let out = run(&mut DisplayHistoryCommand, &mut history, None).unwrap();
        assert_eq!(out, Output::History(vec![HistoryEntry::new("add", d("5"), Some(d("3")), d("8"))]));
    }

    #[test]
    fn test_menu_lists_registry() {
        let mut history = History::new();
        let Output::Commands(commands) = run(&mut MenuCommand, &mut history, None).unwrap() else {
            panic!("menu should list commands");
        };
        assert!(commands.iter().any(|c| c.name == "sqrt" && c.signature == Signature::operand()));
        assert!(commands.iter().any(|c| c.name == "save_history"));
    }

    #[test]
    fn test_path_arg() {
        assert_eq!(path_arg(vec![]), None);
        assert_eq!(path_arg(vec![Arg::from("out.csv")]), Some(PathBuf::from("out.csv")));
        assert_eq!(path_arg(vec![Arg::from_word("2024.10")]), Some(PathBuf::from("2024.10")));
        assert_eq!(path_arg(vec![Arg::from_word("1e3")]), Some(PathBuf::from("1e3")));
    }
}

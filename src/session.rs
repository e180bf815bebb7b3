// session module - the shared rhai environment every fragment runs in

use anyhow::{anyhow, Result};
use rhai::{Dynamic, Engine, Scope, AST};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// one live interpreter: variables in `scope`, script functions in `library`
///
/// fragments and breakpoint input are evaluated one after another against the
/// same session, so each sees what the previous ones defined. script functions
/// also read variables bound by earlier units through `globals`, a copy of the
/// scope taken before each unit runs; writes from inside a function stay local.
pub struct Session {
    engine: Engine,
    scope: Scope<'static>,
    library: AST,
    globals: Rc<RefCell<HashMap<String, Dynamic>>>,
}

/// a variable visible in the session
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub value: Dynamic,
    pub constant: bool,
}

impl Session {
    pub fn new() -> Self {
        let globals: Rc<RefCell<HashMap<String, Dynamic>>> = Rc::default();
        let mut engine = Engine::new();

        let lookup = Rc::clone(&globals);
        engine.on_var(move |name, _index, context| {
            // anything in the running scope (function locals included) wins
            if context.scope().contains(name) {
                return Ok(None);
            }
            Ok(lookup.borrow().get(name).cloned())
        });

        Self {
            engine,
            scope: Scope::new(),
            library: AST::empty(),
            globals,
        }
    }

    /// compile and run `source` as one program unit, returning its final value
    pub fn execute(&mut self, source: &str) -> Result<Dynamic> {
        let ast = self
            .engine
            .compile_with_scope(&self.scope, source)
            .map_err(|err| anyhow!("syntax error: {err}"))?;

        // functions from earlier units stay callable; redefinitions win
        let unit = self.library.merge(&ast);
        self.library = unit.clone_functions_only();
        self.snapshot_globals();

        self.engine
            .eval_ast_with_scope::<Dynamic>(&mut self.scope, &unit)
            .map_err(|err| anyhow!("runtime error: {err}"))
    }

    /// current value of variable `name`, if it exists and has type `T`
    pub fn get<T: Clone + Send + Sync + 'static>(&self, name: &str) -> Option<T> {
        self.scope.get_value::<T>(name)
    }

    fn snapshot_globals(&self) {
        let mut globals = self.globals.borrow_mut();
        globals.clear();
        // later entries shadow earlier ones of the same name
        for (name, _, value) in self.scope.iter() {
            globals.insert(name.to_string(), value);
        }
    }

    /// visible variables in declaration order, shadowed ones left out
    pub fn bindings(&self) -> Vec<Binding> {
        let mut seen = HashSet::new();
        let mut bindings: Vec<Binding> = self
            .scope
            .iter()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .filter(|(name, _, _)| seen.insert(name.to_string()))
            .map(|(name, constant, value)| Binding {
                name: name.to_string(),
                value,
                constant,
            })
            .collect();

        bindings.reverse();
        bindings
    }

    /// number of script-defined functions currently available
    pub fn function_count(&self) -> usize {
        self.library.iter_functions().count()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_carry_over_between_units() {
        let mut session = Session::new();
        session.execute("\nlet a = 1\n\n\n").unwrap();
        session.execute("\nlet b = a + 1\n\n\n").unwrap();
        assert_eq!(session.get::<i64>("b"), Some(2));
    }

    #[test]
    fn functions_carry_over_between_units() {
        let mut session = Session::new();
        session.execute("fn double(x) { x * 2 }").unwrap();
        assert_eq!(session.function_count(), 1);

        session.execute("let y = double(21);").unwrap();
        assert_eq!(session.get::<i64>("y"), Some(42));
    }

    #[test]
    fn redefined_function_replaces_earlier_one() {
        let mut session = Session::new();
        session.execute("fn pick() { 1 }").unwrap();
        session.execute("fn pick() { 2 }").unwrap();
        assert_eq!(session.function_count(), 1);

        let value = session.execute("pick()").unwrap();
        assert_eq!(value.as_int().unwrap(), 2);
    }

    #[test]
    fn final_expression_is_returned() {
        let mut session = Session::new();
        session.execute("let xs = [3, 1, 2];").unwrap();
        let value = session.execute("xs.len()").unwrap();
        assert_eq!(value.as_int().unwrap(), 3);
        assert!(session.execute("let z = 0;").unwrap().is_unit());
    }

    #[test]
    fn syntax_errors_are_reported() {
        let mut session = Session::new();
        let err = session.execute("let = ;").unwrap_err();
        assert!(err.to_string().starts_with("syntax error"));
    }

    #[test]
    fn runtime_errors_are_reported() {
        let mut session = Session::new();
        let err = session.execute("missing + 1").unwrap_err();
        assert!(err.to_string().starts_with("runtime error"));
    }

    #[test]
    fn closing_fence_in_source_fails_to_compile() {
        let mut session = Session::new();
        assert!(session.execute("\nlet a = 1;\n```\n\n\n").is_err());
    }

    #[test]
    fn bindings_hide_shadowed_values() {
        let mut session = Session::new();
        session.execute("let a = 1;").unwrap();
        session.execute("let b = \"two\";").unwrap();
        session.execute("let a = 3;").unwrap();

        let bindings = session.bindings();
        let names: Vec<_> = bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(bindings[1].value.as_int().unwrap(), 3);
    }

    #[test]
    fn same_unit_shadowing_keeps_one_binding() {
        let mut session = Session::new();
        session.execute("let a = 1; let b = \"two\"; let a = 3;").unwrap();

        let bindings = session.bindings();
        let names: Vec<_> = bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(session.get::<i64>("a"), Some(3));
    }

    #[test]
    fn functions_read_variables_from_earlier_units() {
        let mut session = Session::new();
        session.execute("let nums = [1, 2, 3];").unwrap();
        session.execute("fn total() { nums.len() } let t = total();").unwrap();
        assert_eq!(session.get::<i64>("t"), Some(3));
    }

    #[test]
    fn functions_see_the_latest_value() {
        let mut session = Session::new();
        session.execute("let k = 1; fn scaled(x) { x * k }").unwrap();
        session.execute("let k = 10;").unwrap();
        let value = session.execute("scaled(4)").unwrap();
        assert_eq!(value.as_int().unwrap(), 40);
    }

    #[test]
    fn function_locals_shadow_session_variables() {
        let mut session = Session::new();
        session.execute("let i = 100;").unwrap();
        session
            .execute("fn count(n) { let i = 0; while i < n { i += 1; } i }")
            .unwrap();
        let value = session.execute("count(3)").unwrap();
        assert_eq!(value.as_int().unwrap(), 3);
        assert_eq!(session.get::<i64>("i"), Some(100));
    }

    #[test]
    fn function_writes_do_not_leak_out() {
        let mut session = Session::new();
        session.execute("let seen = [];").unwrap();
        session.execute("fn mark() { let local = seen; local.push(1); local.len() }").unwrap();
        assert_eq!(session.execute("mark()").unwrap().as_int().unwrap(), 1);
        assert_eq!(session.execute("seen.len()").unwrap().as_int().unwrap(), 0);
    }

    #[test]
    fn constants_are_flagged() {
        let mut session = Session::new();
        session.execute("const LIMIT = 10;").unwrap();
        let bindings = session.bindings();
        assert_eq!(bindings.len(), 1);
        assert!(bindings[0].constant);
    }
}

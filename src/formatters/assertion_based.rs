use super::{StubRenderer, StubStyle};

/// One free `test_<name>` function per function. Each imports the module by
/// name and checks that calling the function without arguments returns
/// something other than `None`.
pub struct AssertionBasedStub;

impl StubRenderer for AssertionBasedStub {
    fn render(&self, module_name: &str, functions: &[String]) -> String {
        let mut output = String::with_capacity(functions.len() * 96);

        for func in functions {
            output.push_str(&format!("def test_{}():\n", func));
            output.push_str(&format!("    import {}\n", module_name));
            output.push_str(&format!(
                "    assert {}.{}() is not None\n\n",
                module_name, func
            ));
        }

        output
    }

    fn style(&self) -> StubStyle {
        StubStyle::Assert
    }
}

use doctrace_catalog::{FunctionDescriptor, Parameter};
use serde::Serialize;

/// Definition and parameter table shown beside a resolved function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSummary {
    pub name: String,
    pub definition: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
}

impl FunctionSummary {
    pub fn from_descriptor(descriptor: &FunctionDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            definition: descriptor.definition.clone(),
            parameters: descriptor.parameters.clone(),
            return_type: descriptor.return_type.clone(),
        }
    }

    /// Plain-text rendering: the definition, then a name/type table
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.definition);
        out.push_str("\n\n| Name | Type |\n|------|------|\n");
        for param in &self.parameters {
            out.push_str(&format!(
                "| {} | {} |\n",
                param.name,
                param.ty.as_deref().unwrap_or("-")
            ));
        }
        if let Some(ret) = &self.return_type {
            out.push_str(&format!("| returns | {} |\n", ret));
        }
        out
    }
}

use mcc_core::Violation;
use mcc_core::entities::{
    Adr, AgentUpdate, Feature, Project, Proposal, RefactorPlan, Rule, Specification,
};
use schemars::schema_for;

use crate::cli::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `mcc schema <type>`.
pub fn handle(args: &SchemaArgs) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::Project => schema_for!(Project),
        SchemaType::Feature => schema_for!(Feature),
        SchemaType::Specification => schema_for!(Specification),
        SchemaType::RefactorPlan => schema_for!(RefactorPlan),
        SchemaType::Adr => schema_for!(Adr),
        SchemaType::Rule => schema_for!(Rule),
        SchemaType::Proposal => schema_for!(Proposal),
        SchemaType::AgentUpdate => schema_for!(AgentUpdate),
        SchemaType::Violation => schema_for!(Violation),
    };
    output(&schema)
}

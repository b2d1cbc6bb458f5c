use anyhow::Result;
use survey_rules::Survey;

use super::print_json;

pub fn run() -> Result<()> {
    print_json(&schemars::schema_for!(Survey))
}

pub mod condition;
pub mod group;
pub mod question;
pub mod survey;
pub mod table;
pub mod validation;

pub use condition::{Condition, ConditionGroup, ConditionKind, LogicType};
pub use group::QuestionGroup;
pub use question::{Question, QuestionType};
pub use survey::Survey;
pub use table::{
    CellKind, CellOption, CheckType, Combinator, TableCell, TableCheck, TableColumn, TableRow,
};
pub use validation::{RuleAction, RuleType, TableValidationRule};

//! Triggers: BEFORE validation, AFTER audit logging, and the remaining
//! trigger kinds as reference panels.

use crate::datasets;
use crate::error::Result;
use crate::panels::mutate::shared;
use crate::panels::showcase::{AfterTriggerPanel, BeforeTriggerPanel};
use crate::panels::{Panel, QuizPanel, StaticPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let products = shared(datasets::products()?);
    let audit = shared(datasets::audit_log()?);

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(BeforeTriggerPanel::new(
            "BEFORE",
            "A BEFORE trigger runs ahead of the operation and can stop it:\n\
             inserting a product with negative stock is rejected before it\n\
             reaches the table.",
            "CREATE TRIGGER before_insert_product\n\
             BEFORE INSERT ON products\n\
             FOR EACH ROW\n\
             BEGIN\n\
             \x20   IF NEW.stock < 0 THEN\n\
             \x20       SIGNAL SQLSTATE '45000';\n\
             \x20   END IF;\n\
             END;",
            products.clone(),
        )),
        Box::new(AfterTriggerPanel::new(
            "AFTER",
            "An AFTER trigger runs once the operation succeeds: every insert\n\
             appends an entry to the audit log.",
            "CREATE TRIGGER after_insert_product\n\
             AFTER INSERT ON products\n\
             FOR EACH ROW\n\
             INSERT INTO audit_log (action, product_id)\n\
             VALUES ('INSERT', NEW.product_id);",
            products,
            audit,
        )),
        Box::new(
            StaticPanel::new(
                "INSTEAD OF",
                "An INSTEAD OF trigger replaces the triggering operation and\n\
                 is how otherwise read-only views accept writes.",
            )
            .with_sql(
                "CREATE TRIGGER instead_insert\n\
                 INSTEAD OF INSERT ON employee_view\n\
                 FOR EACH ROW\n\
                 INSERT INTO employees (emp_id, name)\n\
                 VALUES (NEW.emp_id, NEW.name);",
            ),
        ),
        Box::new(
            StaticPanel::new(
                "Events",
                "Triggers attach to INSERT, UPDATE or DELETE, and a table may\n\
                 carry one of each for before and after.",
            )
            .with_sql(
                "CREATE TRIGGER log_delete\n\
                 AFTER DELETE ON products\n\
                 FOR EACH ROW\n\
                 INSERT INTO audit_log (action, product_id)\n\
                 VALUES ('DELETE', OLD.product_id);",
            ),
        ),
        Box::new(
            StaticPanel::new(
                "Conditions",
                "A trigger body can test the incoming row and act only when\n\
                 its condition holds, such as flagging unusually large price\n\
                 changes.",
            )
            .with_sql(
                "CREATE TRIGGER flag_price_jump\n\
                 AFTER UPDATE ON products\n\
                 FOR EACH ROW\n\
                 WHEN (NEW.price > OLD.price * 2)\n\
                 INSERT INTO audit_log (action, product_id)\n\
                 VALUES ('PRICE-JUMP', NEW.product_id);",
            ),
        ),
        Box::new(
            StaticPanel::new(
                "Dropping",
                "DROP TRIGGER removes the trigger; the table and its data are\n\
                 unaffected.",
            )
            .with_sql("DROP TRIGGER before_insert_product;"),
        ),
        Box::new(QuizPanel::new(Quiz::multi(
            "Which statements about triggers are true? (Select all that apply)",
            &[
                "A BEFORE trigger executes before an operation.",
                "An AFTER trigger executes instead of an operation.",
                "INSTEAD OF triggers work with views.",
                "Triggers can be created for INSERT, UPDATE, and DELETE operations.",
            ],
            &[
                "A BEFORE trigger executes before an operation.",
                "INSTEAD OF triggers work with views.",
                "Triggers can be created for INSERT, UPDATE, and DELETE operations.",
            ],
        ))),
    ];

    Ok(Page::new("Triggers", panels))
}

use crate::output::{print_json, print_table};
use tutorbook_core::lesson::{AddOn, LessonKind};

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        #[derive(serde::Serialize)]
        struct CatalogLesson {
            kind: LessonKind,
            base_price: f64,
        }
        #[derive(serde::Serialize)]
        struct CatalogAddOn {
            add_on: AddOn,
            surcharge: f64,
        }
        #[derive(serde::Serialize)]
        struct Catalog {
            lessons: Vec<CatalogLesson>,
            add_ons: Vec<CatalogAddOn>,
        }
        return print_json(&Catalog {
            lessons: LessonKind::all()
                .iter()
                .map(|&kind| CatalogLesson {
                    kind,
                    base_price: kind.base_price(),
                })
                .collect(),
            add_ons: AddOn::all()
                .iter()
                .map(|&add_on| CatalogAddOn {
                    add_on,
                    surcharge: add_on.surcharge(),
                })
                .collect(),
        });
    }

    println!("Lessons:");
    print_table(
        &["kind", "base price"],
        LessonKind::all()
            .iter()
            .map(|k| vec![k.to_string(), format!("{:.2}", k.base_price())])
            .collect(),
    );

    println!("\nAdd-ons:");
    print_table(
        &["add-on", "surcharge"],
        AddOn::all()
            .iter()
            .map(|a| vec![a.to_string(), format!("{:.2}", a.surcharge())])
            .collect(),
    );
    Ok(())
}

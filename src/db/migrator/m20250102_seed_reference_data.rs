use crate::entities::prelude::*;
use crate::entities::{interactions, medicines};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

struct SeedMedicine {
    name: &'static str,
    active_ingredient: &'static str,
    description: &'static str,
    simplified_description: &'static str,
    common_side_effects: &'static [&'static str],
    warnings: &'static [&'static str],
}

const MEDICINES: &[SeedMedicine] = &[
    SeedMedicine {
        name: "Panadol",
        active_ingredient: "Paracetamol",
        description: "Common pain reliever and fever reducer.",
        simplified_description: "Good for headaches and fever. Safe for most people.",
        common_side_effects: &["Nausea (rare)", "Rash (rare)"],
        warnings: &["Do not take more than 4000mg per day."],
    },
    SeedMedicine {
        name: "Brufen",
        active_ingredient: "Ibuprofen",
        description: "Non-steroidal anti-inflammatory drug (NSAID).",
        simplified_description: "Good for muscle pain and swelling. Take with food.",
        common_side_effects: &["Stomach pain", "Heartburn", "Dizziness"],
        warnings: &["Avoid if you have stomach ulcers."],
    },
    SeedMedicine {
        name: "Aspirin",
        active_ingredient: "Acetylsalicylic acid",
        description: "Blood thinner and pain reliever.",
        simplified_description: "Keeps blood thin to prevent heart attacks.",
        common_side_effects: &["Indigestion", "Bleeding more easily"],
        warnings: &["Stop taking before surgery."],
    },
    SeedMedicine {
        name: "Warfarin",
        active_ingredient: "Warfarin",
        description: "Anticoagulant medication.",
        simplified_description: "Strong blood thinner to prevent clots.",
        common_side_effects: &["Severe bleeding", "Bruising"],
        warnings: &["Requires regular blood tests."],
    },
    SeedMedicine {
        name: "Zyrtec",
        active_ingredient: "Cetirizine",
        description: "Antihistamine for allergies.",
        simplified_description: "Stops runny nose and itchiness.",
        common_side_effects: &["Drowsiness", "Dry mouth"],
        warnings: &["Be careful when driving."],
    },
];

// (drug_a, drug_b, severity, description, recommendation)
const INTERACTIONS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Aspirin",
        "Warfarin",
        "Severe",
        "Both drugs thin the blood. Taking them together significantly increases bleeding risk.",
        "DO NOT COMBINE unless strictly monitored by a specialist.",
    ),
    (
        "Brufen",
        "Aspirin",
        "Moderate",
        "Ibuprofen can reduce the heart-protecting effect of Aspirin.",
        "Take Aspirin at least 30 minutes before Brufen.",
    ),
];

fn json_list(items: &[&str]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert()
            .into_table(Medicines)
            .columns([
                medicines::Column::Name,
                medicines::Column::ActiveIngredient,
                medicines::Column::Description,
                medicines::Column::SimplifiedDescription,
                medicines::Column::CommonSideEffects,
                medicines::Column::Warnings,
            ])
            .to_owned();

        for m in MEDICINES {
            insert.values_panic([
                m.name.into(),
                m.active_ingredient.into(),
                m.description.into(),
                m.simplified_description.into(),
                json_list(m.common_side_effects).into(),
                json_list(m.warnings).into(),
            ]);
        }

        manager.exec_stmt(insert).await?;

        let mut insert = Query::insert()
            .into_table(Interactions)
            .columns([
                interactions::Column::DrugA,
                interactions::Column::DrugB,
                interactions::Column::Severity,
                interactions::Column::Description,
                interactions::Column::Recommendation,
            ])
            .to_owned();

        for (drug_a, drug_b, severity, description, recommendation) in INTERACTIONS {
            insert.values_panic([
                (*drug_a).into(),
                (*drug_b).into(),
                (*severity).into(),
                (*description).into(),
                (*recommendation).into(),
            ]);
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Interactions).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Medicines).to_owned())
            .await?;

        Ok(())
    }
}

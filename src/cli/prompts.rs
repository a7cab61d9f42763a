//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Input, MultiSelect};

use crate::pipeline::{FilterCriteria, PassengerClass, Port, Sex, MAX_AGE, MIN_AGE};

/// Selections gathered in one interactive round
#[derive(Debug, Clone)]
pub struct Interaction {
    pub criteria: FilterCriteria,
    pub only_survivors: bool,
}

/// Prompt for a full set of filters, starting from `previous`.
pub fn prompt_interaction(previous: &Interaction) -> Result<Interaction> {
    let classes = multi_select(
        "Passenger Class",
        &PassengerClass::ALL,
        |c| format!("Class {}", c),
        |c| previous.criteria.classes.contains(c),
    )?;

    let sexes = multi_select(
        "Sex",
        &Sex::ALL,
        |s| s.to_string(),
        |s| previous.criteria.sexes.contains(s),
    )?;

    let min_age = prompt_age("Minimum age", previous.criteria.min_age, MIN_AGE)?;
    let max_age = prompt_age("Maximum age", previous.criteria.max_age.max(min_age), min_age)?;

    let ports = multi_select(
        "Embarkation Port",
        &Port::ALL,
        |p| p.display_name().to_string(),
        |p| previous.criteria.ports.contains(p),
    )?;

    let only_survivors = Confirm::new()
        .with_prompt("Show only survivors")
        .default(previous.only_survivors)
        .interact()?;

    Ok(Interaction {
        criteria: FilterCriteria {
            classes: classes.into_iter().collect(),
            sexes: sexes.into_iter().collect(),
            min_age,
            max_age,
            ports: ports.into_iter().collect(),
        },
        only_survivors,
    })
}

/// Prompt user to confirm another round
pub fn confirm_continue() -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt("Change filters and recompute?")
        .default(true)
        .interact()?;
    Ok(confirmed)
}

fn multi_select<T: Copy>(
    prompt: &str,
    options: &[T],
    label: impl Fn(&T) -> String,
    selected: impl Fn(&T) -> bool,
) -> Result<Vec<T>> {
    let labels: Vec<String> = options.iter().map(&label).collect();
    let defaults: Vec<bool> = options.iter().map(&selected).collect();

    let chosen = MultiSelect::new()
        .with_prompt(prompt)
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| options[i]).collect())
}

fn prompt_age(prompt: &str, default: f64, lower: f64) -> Result<f64> {
    let value = Input::<f64>::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(move |v: &f64| -> std::result::Result<(), String> {
            if *v < lower || *v > MAX_AGE {
                Err(format!("Enter an age between {} and {}", lower, MAX_AGE))
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value)
}

//! Service line totals and the grooming price list.

use crate::{api::errors::DomainError, consts, models::appointment::ServiceLine};
use anyhow::bail;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogServiceSchema {
    pub service_name: &'static str,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
}

pub fn get_catalog() -> Vec<CatalogServiceSchema> {
    consts::SERVICE_CATALOG
        .iter()
        .map(|(service_name, price)| CatalogServiceSchema {
            service_name: *service_name,
            price: *price,
        })
        .collect()
}

pub fn catalog_price(service_name: &str) -> Option<Decimal> {
    consts::SERVICE_CATALOG
        .iter()
        .find(|(name, _)| *name == service_name)
        .map(|(_, price)| *price)
}

/// Plain sum of the line prices
pub fn total_of(lines: &[ServiceLine]) -> Decimal {
    lines.iter().map(|line| line.price).sum()
}

/// One line per pet and selected service, priced from the catalog
pub fn expand_selection(pet_count: usize, service_names: &[&str]) -> anyhow::Result<Vec<ServiceLine>> {
    let mut lines = Vec::with_capacity(pet_count * service_names.len());

    for _ in 0..pet_count {
        for service_name in service_names {
            let Some(price) = catalog_price(service_name) else {
                bail!(DomainError::Validation(format!(
                    "Unknown service: {service_name}"
                )));
            };

            lines.push(ServiceLine {
                service_name: service_name.to_string(),
                price,
            });
        }
    }

    Ok(lines)
}

/// Checks the submitted lines and total against the lines the catalog gives
/// for the same services. Without `enforce` every submission is accepted as sent.
pub fn verify_submission(
    lines: &[ServiceLine],
    total_amount: Decimal,
    enforce: bool,
) -> anyhow::Result<()> {
    if !enforce {
        return Ok(());
    }

    let service_names: Vec<&str> = lines.iter().map(|line| line.service_name.as_str()).collect();
    let expected = expand_selection(1, &service_names)?;

    for (line, priced) in lines.iter().zip(&expected) {
        if line.price != priced.price {
            bail!(DomainError::Validation(format!(
                "Invalid price for {}",
                line.service_name
            )));
        }
    }

    if total_of(&expected) != total_amount {
        bail!(DomainError::validation(
            "Total amount does not match the selected services"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(service_name: &str, price: Decimal) -> ServiceLine {
        ServiceLine {
            service_name: service_name.into(),
            price,
        }
    }

    #[test]
    fn test_total_of() {
        assert_eq!(total_of(&[]), Decimal::ZERO);
        assert_eq!(
            total_of(&[
                line("Bath & Blow Dry", dec!(350)),
                line("Nail Trimming", dec!(150)),
                line("Bath & Blow Dry", dec!(350)),
            ]),
            dec!(850)
        );
    }

    #[test]
    fn test_expand_selection_one_line_per_pet_and_service() {
        let lines = expand_selection(2, &["Full Grooming", "Ear Cleaning"]).unwrap();

        assert_eq!(lines.len(), 4);
        assert_eq!(total_of(&lines), dec!(1560));
        assert_eq!(lines[0], line("Full Grooming", dec!(600)));
        assert_eq!(lines[3], line("Ear Cleaning", dec!(180)));

        assert!(expand_selection(1, &["Massage"]).is_err());
    }

    #[test]
    fn test_verify_submission_accepts_mismatch_by_default() {
        let lines = [line("Bath & Blow Dry", dec!(1))];

        assert!(verify_submission(&lines, dec!(9999), false).is_ok());
    }

    #[test]
    fn test_verify_submission_enforced() {
        let lines = [line("Bath & Blow Dry", dec!(350)), line("Teeth Brushing", dec!(200))];
        assert!(verify_submission(&lines, dec!(550), true).is_ok());
        assert!(verify_submission(&lines, dec!(500), true).is_err());

        let cheap = [line("Bath & Blow Dry", dec!(1))];
        let err = verify_submission(&cheap, dec!(1), true).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::Validation("Invalid price for Bath & Blow Dry".into()))
        );

        let unknown = [line("Massage", dec!(100))];
        let err = verify_submission(&unknown, dec!(100), true).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::Validation("Unknown service: Massage".into()))
        );
    }
}

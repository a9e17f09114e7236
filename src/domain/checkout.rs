use std::fmt;

use bigdecimal::BigDecimal;

use super::order::PaymentMethod;

/// Checkout form data as entered by the customer.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub payment: PaymentMethod,
    pub change_for: Option<BigDecimal>,
}

/// Field-keyed validation failures, surfaced inline and never sent to the
/// backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&summary)
    }
}

impl std::error::Error for ValidationErrors {}

impl CheckoutForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut fields = Vec::new();

        if self.customer_name.trim().is_empty() {
            fields.push(FieldError {
                field: "customer_name",
                message: "Nome do cliente é obrigatório".to_string(),
            });
        }

        let phone_digits: String = self.phone.chars().filter(char::is_ascii_digit).collect();
        if self.phone.trim().is_empty() {
            fields.push(FieldError {
                field: "phone",
                message: "Telefone é obrigatório".to_string(),
            });
        } else if !(10..=11).contains(&phone_digits.len()) {
            fields.push(FieldError {
                field: "phone",
                message: "Telefone inválido (apenas números, 10 ou 11 dígitos)".to_string(),
            });
        }

        if self.address.trim().is_empty() {
            fields.push(FieldError {
                field: "address",
                message: "Endereço é obrigatório".to_string(),
            });
        }

        if self.payment == PaymentMethod::Cash {
            let positive = self
                .change_for
                .as_ref()
                .is_some_and(|v| *v > BigDecimal::from(0));
            if !positive {
                fields.push(FieldError {
                    field: "change_for",
                    message: "Informe um valor válido para o troco".to_string(),
                });
            }
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { fields })
        }
    }
}

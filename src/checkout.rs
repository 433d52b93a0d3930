//! Checkout
//!
//! Validates customer input and turns the current cart into an [`OrderDraft`].
//! Validation failures are local: they are reported per field and never reach
//! the order endpoint.

use std::fmt::{Display, Formatter, Result as FmtResult};

use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::Cart,
    orders::{Customer, OrderDraft, PaymentMethod},
    prices::Price,
};

/// Minimum number of digits in a phone number.
pub const PHONE_MIN_DIGITS: usize = 10;

/// Maximum number of digits in a phone number.
pub const PHONE_MAX_DIGITS: usize = 15;

/// Delivery surcharge applied by the delivery checkout.
pub const DELIVERY_SURCHARGE: i64 = 2;

/// Checkout variant settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPolicy {
    /// Whether a delivery address must be supplied
    pub require_address: bool,

    /// Fixed amount added to the cart total
    pub surcharge: Price,
}

impl CheckoutPolicy {
    /// Delivery checkout: address required, delivery surcharge applied.
    pub fn delivery() -> Self {
        CheckoutPolicy {
            require_address: true,
            surcharge: Price::from(DELIVERY_SURCHARGE),
        }
    }

    /// Pickup checkout: no address, no surcharge.
    pub fn pickup() -> Self {
        CheckoutPolicy {
            require_address: false,
            surcharge: Price::ZERO,
        }
    }
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self::delivery()
    }
}

/// Raw checkout form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Phone number, any formatting
    pub phone: String,

    /// Delivery address
    pub address: String,

    /// Payment method
    pub payment_method: PaymentMethod,
}

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// First name
    FirstName,

    /// Last name
    LastName,

    /// Phone
    Phone,

    /// Address
    Address,

    /// The cart itself
    Items,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Items => "items",
        })
    }
}

/// A single field failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Field was blank after trimming
    #[error("{0} is required")]
    Required(Field),

    /// Phone did not contain 10 to 15 digits
    #[error("phone must contain between 10 and 15 digits, found {0}")]
    InvalidPhone(usize),

    /// Nothing to order
    #[error("cart is empty")]
    EmptyCart,
}

impl CheckoutError {
    /// Field the error should be shown next to.
    pub fn field(&self) -> Field {
        match self {
            CheckoutError::Required(field) => *field,
            CheckoutError::InvalidPhone(_) => Field::Phone,
            CheckoutError::EmptyCart => Field::Items,
        }
    }
}

/// All failures for one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("checkout has {} invalid field(s)", .0.len())]
pub struct CheckoutErrors(SmallVec<[CheckoutError; 4]>);

impl CheckoutErrors {
    /// Error reported for `field`, if any.
    pub fn for_field(&self, field: Field) -> Option<&CheckoutError> {
        self.0.iter().find(|error| error.field() == field)
    }

    /// All errors, in form order.
    pub fn iter(&self) -> impl Iterator<Item = &CheckoutError> {
        self.0.iter()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether nothing failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Checkout input that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCheckout {
    /// Customer details
    pub customer: Customer,

    /// Delivery address, if given
    pub address: Option<String>,

    /// Payment method
    pub payment_method: PaymentMethod,
}

/// Number of digits in `phone` once every other character is stripped.
pub fn phone_digits(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}

fn required(value: &str, field: Field, errors: &mut SmallVec<[CheckoutError; 4]>) -> String {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        errors.push(CheckoutError::Required(field));
    }

    trimmed.to_string()
}

impl CheckoutForm {
    /// Validate every field against `policy`.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(&self, policy: &CheckoutPolicy) -> Result<ValidCheckout, CheckoutErrors> {
        let mut errors = SmallVec::new();

        let first_name = required(&self.first_name, Field::FirstName, &mut errors);
        let last_name = required(&self.last_name, Field::LastName, &mut errors);
        let phone = required(&self.phone, Field::Phone, &mut errors);

        if !phone.is_empty() {
            let digits = phone_digits(&phone);

            if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
                errors.push(CheckoutError::InvalidPhone(digits));
            }
        }

        let address = if policy.require_address {
            Some(required(&self.address, Field::Address, &mut errors))
        } else {
            Some(self.address.trim().to_string()).filter(|address| !address.is_empty())
        };

        if !errors.is_empty() {
            return Err(CheckoutErrors(errors));
        }

        Ok(ValidCheckout {
            customer: Customer {
                first_name,
                last_name,
                phone,
            },
            address,
            payment_method: self.payment_method,
        })
    }
}

/// Validate `form` and snapshot `cart` into an order draft.
///
/// # Errors
///
/// Returns `CheckoutErrors` if any field fails or the cart is empty; no draft
/// is assembled in that case.
pub fn prepare(
    cart: &Cart,
    form: &CheckoutForm,
    policy: &CheckoutPolicy,
) -> Result<OrderDraft, CheckoutErrors> {
    let checkout = match form.validate(policy) {
        Ok(checkout) if !cart.is_empty() => checkout,
        Ok(_) => return Err(CheckoutErrors(SmallVec::from_elem(CheckoutError::EmptyCart, 1))),
        Err(CheckoutErrors(mut errors)) => {
            if cart.is_empty() {
                errors.push(CheckoutError::EmptyCart);
            }

            return Err(CheckoutErrors(errors));
        }
    };

    Ok(OrderDraft::assemble(
        cart,
        checkout.customer,
        checkout.payment_method,
        checkout.address,
        policy.surcharge,
    ))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::catalog::{Product, ProductId};

    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            phone: "(11) 5555-1234".to_string(),
            address: "Av. Siempre Viva 742".to_string(),
            payment_method: PaymentMethod::Cash,
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();

        cart.add_item(&Product {
            id: ProductId::from(1),
            name: "Clásica".to_string(),
            description: None,
            price: Price::from(1200),
            image: None,
            category_id: None,
            is_active: true,
            is_available: true,
        });

        cart
    }

    #[test]
    fn valid_form_passes() -> TestResult {
        let checkout = form().validate(&CheckoutPolicy::delivery())?;

        assert_eq!(checkout.customer.first_name, "Ana");
        assert_eq!(checkout.address.as_deref(), Some("Av. Siempre Viva 742"));

        Ok(())
    }

    #[test]
    fn values_are_trimmed() -> TestResult {
        let input = CheckoutForm {
            first_name: "  Ana ".to_string(),
            ..form()
        };

        let checkout = input.validate(&CheckoutPolicy::delivery())?;

        assert_eq!(checkout.customer.first_name, "Ana");

        Ok(())
    }

    #[test]
    fn blank_names_are_required() {
        let input = CheckoutForm {
            first_name: "   ".to_string(),
            last_name: String::new(),
            ..form()
        };

        let Err(errors) = input.validate(&CheckoutPolicy::delivery()) else {
            panic!("expected validation to fail");
        };

        assert_eq!(
            errors.for_field(Field::FirstName),
            Some(&CheckoutError::Required(Field::FirstName))
        );
        assert_eq!(
            errors.for_field(Field::LastName),
            Some(&CheckoutError::Required(Field::LastName))
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn blank_phone_is_required_not_invalid() {
        let input = CheckoutForm {
            phone: " ".to_string(),
            ..form()
        };

        let Err(errors) = input.validate(&CheckoutPolicy::delivery()) else {
            panic!("expected validation to fail");
        };

        assert_eq!(
            errors.for_field(Field::Phone),
            Some(&CheckoutError::Required(Field::Phone))
        );
    }

    #[test]
    fn short_phone_is_invalid() {
        let input = CheckoutForm {
            phone: "555-123".to_string(),
            ..form()
        };

        let Err(errors) = input.validate(&CheckoutPolicy::delivery()) else {
            panic!("expected validation to fail");
        };

        assert_eq!(
            errors.for_field(Field::Phone),
            Some(&CheckoutError::InvalidPhone(6))
        );
    }

    #[test]
    fn phone_digit_bounds_are_inclusive() {
        let policy = CheckoutPolicy::pickup();

        for (phone, ok) in [
            ("123456789", false),
            ("1234567890", true),
            ("123456789012345", true),
            ("1234567890123456", false),
            ("+54 9 11 5555-1234", true),
        ] {
            let input = CheckoutForm {
                phone: phone.to_string(),
                ..form()
            };

            assert_eq!(input.validate(&policy).is_ok(), ok, "phone {phone}");
        }
    }

    #[test]
    fn address_required_for_delivery_only() -> TestResult {
        let input = CheckoutForm {
            address: "  ".to_string(),
            ..form()
        };

        let delivery = input.validate(&CheckoutPolicy::delivery());

        assert!(
            matches!(&delivery, Err(errors) if errors.for_field(Field::Address).is_some()),
            "expected address error, got {delivery:?}"
        );

        let pickup = input.validate(&CheckoutPolicy::pickup())?;

        assert_eq!(pickup.address, None);

        Ok(())
    }

    #[test]
    fn prepare_builds_draft_with_surcharge() -> TestResult {
        let draft = prepare(&cart(), &form(), &CheckoutPolicy::delivery())?;

        assert_eq!(draft.total, Price::from(1202));
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.customer.last_name, "Pérez");

        Ok(())
    }

    #[test]
    fn prepare_rejects_empty_cart() {
        let result = prepare(&Cart::new(), &form(), &CheckoutPolicy::delivery());

        let Err(errors) = result else {
            panic!("expected empty cart to be rejected");
        };

        assert_eq!(errors.for_field(Field::Items), Some(&CheckoutError::EmptyCart));
    }

    #[test]
    fn prepare_reports_fields_and_empty_cart_together() {
        let input = CheckoutForm {
            phone: String::new(),
            ..form()
        };

        let Err(errors) = prepare(&Cart::new(), &input, &CheckoutPolicy::pickup()) else {
            panic!("expected validation to fail");
        };

        assert_eq!(errors.len(), 2);
    }
}

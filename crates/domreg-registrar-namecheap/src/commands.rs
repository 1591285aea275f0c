// # Namecheap Commands
//
// Request parameters and response extraction for the three commands the
// gateway issues. Kept free of I/O so both directions can be unit tested.
//
// ## API Reference
//
// - namecheap.domains.check: https://www.namecheap.com/support/api/methods/domains/check/
// - namecheap.users.getPricing: https://www.namecheap.com/support/api/methods/users/get-pricing/
// - namecheap.domains.create: https://www.namecheap.com/support/api/methods/domains/create/

use domreg_core::traits::{
    Availability, CreateResult, DomainOrder, PriceTier, PricingQuote, RegistrantProfile,
};
use domreg_core::{Error, Result};

use crate::xml::Element;

pub const CHECK: &str = "namecheap.domains.check";
pub const GET_PRICING: &str = "namecheap.users.getPricing";
pub const CREATE: &str = "namecheap.domains.create";

/// Contact roles the create command requires, all filled from one profile
const CONTACT_ROLES: [&str; 4] = ["Registrant", "Tech", "Admin", "AuxBilling"];

/// Query parameters beyond the authentication block
pub type Params = Vec<(String, String)>;

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

pub fn check_params(domain: &str) -> Params {
    vec![("DomainList".to_string(), domain.to_string())]
}

pub fn pricing_params(tld: &str) -> Params {
    vec![
        ("ProductType".to_string(), "DOMAIN".to_string()),
        ("ProductCategory".to_string(), "DOMAINS".to_string()),
        ("ActionName".to_string(), "REGISTER".to_string()),
        ("ProductName".to_string(), tld.to_string()),
    ]
}

/// Parameters for `namecheap.domains.create`
///
/// Nameservers are sent as `Nameserver1`, `Nameserver2`, ... in order.
pub fn create_params(order: &DomainOrder) -> Params {
    let mut params = vec![
        ("DomainName".to_string(), order.domain.clone()),
        ("Years".to_string(), order.years.to_string()),
        (
            "AddFreeWhoisguard".to_string(),
            yes_no(order.whois_privacy).to_string(),
        ),
        (
            "WGEnabled".to_string(),
            yes_no(order.whois_privacy).to_string(),
        ),
    ];

    for role in CONTACT_ROLES {
        push_contact(&mut params, role, &order.registrant);
    }

    for (index, nameserver) in order.nameservers.iter().enumerate() {
        params.push((format!("Nameserver{}", index + 1), nameserver.clone()));
    }

    params
}

fn push_contact(params: &mut Params, role: &str, profile: &RegistrantProfile) {
    let mut field = |name: &str, value: &str| {
        params.push((format!("{}{}", role, name), value.to_string()));
    };

    field("FirstName", &profile.first_name);
    field("LastName", &profile.last_name);
    field("Address1", &profile.address1);
    if let Some(address2) = &profile.address2 {
        field("Address2", address2);
    }
    field("City", &profile.city);
    field("StateProvince", &profile.state_province);
    field("PostalCode", &profile.postal_code);
    field("Country", &profile.country);
    field("Phone", &profile.phone);
    field("EmailAddress", &profile.email);
    if let Some(organization) = &profile.organization {
        field("OrganizationName", organization);
    }
}

/// Extract the availability of `domain` from a check response
pub fn parse_availability(response: &Element, domain: &str) -> Result<Availability> {
    let results = response.find_all("DomainCheckResult");

    let result = results
        .iter()
        .find(|r| {
            r.attr("Domain")
                .is_some_and(|d| d.eq_ignore_ascii_case(domain))
        })
        .or_else(|| results.first())
        .ok_or_else(|| Error::malformed("Response has no <DomainCheckResult>"))?;

    let premium = result.flag("IsPremiumName");
    Ok(Availability {
        domain: result
            .attr_owned("Domain")
            .unwrap_or_else(|| domain.to_string()),
        available: result.flag("Available"),
        premium,
        premium_price: if premium {
            result
                .attr_owned("PremiumRegistrationPrice")
                .filter(|price| price != "0" && price != "0.0")
        } else {
            None
        },
    })
}

/// Extract registration price tiers from a getPricing response
///
/// Only `DurationType="YEAR"` entries are kept; tiers are sorted by period.
pub fn parse_pricing(response: &Element, tld: &str, years: Option<u32>) -> Result<PricingQuote> {
    let product = response
        .find_all("Product")
        .into_iter()
        .find(|p| {
            p.attr("Name")
                .is_some_and(|name| name.eq_ignore_ascii_case(tld))
        })
        .ok_or_else(|| Error::malformed(format!("No pricing published for .{}", tld)))?;

    let mut tiers = Vec::new();
    for price in product.children_named("Price") {
        let is_yearly = price
            .attr("DurationType")
            .is_none_or(|kind| kind.eq_ignore_ascii_case("YEAR"));
        if !is_yearly {
            continue;
        }

        let Some(years) = price.attr("Duration").and_then(|d| d.trim().parse::<u32>().ok())
        else {
            continue;
        };

        let Some(charged) = price
            .attr_owned("YourPrice")
            .or_else(|| price.attr_owned("Price"))
        else {
            continue;
        };

        let regular_price = price
            .attr_owned("RegularPrice")
            .filter(|regular| regular != &charged);

        tiers.push(PriceTier {
            years,
            price: charged,
            regular_price,
            currency: price
                .attr_owned("Currency")
                .unwrap_or_else(|| "USD".to_string()),
        });
    }

    if tiers.is_empty() {
        return Err(Error::malformed(format!(
            "Pricing for .{} contains no yearly registration prices",
            tld
        )));
    }

    tiers.sort_by_key(|tier| tier.years);

    Ok(PricingQuote {
        tld: tld.to_lowercase(),
        requested_years: years,
        tiers,
    })
}

/// Extract the create-domain result
///
/// A response without `<DomainCreateResult>` yields an empty result rather
/// than an error; the caller decides what a missing order id means.
pub fn parse_create(response: &Element) -> CreateResult {
    let Some(result) = response.find("DomainCreateResult") else {
        return CreateResult::default();
    };

    CreateResult {
        registered: result.flag("Registered"),
        order_id: result.attr_owned("OrderID"),
        transaction_id: result.attr_owned("TransactionID"),
        register_date: result.attr_owned("RegisterDate"),
        charged_amount: result.attr_owned("ChargedAmount"),
        domain_id: result.attr_owned("DomainID"),
    }
}

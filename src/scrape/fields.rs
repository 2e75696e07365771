//! Where each staged field lives on a shipment page and how it is read.

use super::html::{self, Locator};
use super::parse;
use crate::ingest::{StagedProduct, StagedShipment};

/// Stores the parsed element text; `None` means it did not parse and the
/// field default applies.
pub type ShipmentSetter = fn(&mut StagedShipment, &str) -> Option<()>;

/// One shipment-level field. Locators are tried in order and the first
/// element whose text parses wins.
pub struct ShipmentField {
    pub name: &'static str,
    pub locators: &'static [Locator],
    pub set: ShipmentSetter,
    pub default: fn(&mut StagedShipment),
}

pub const SHIPMENT_FIELDS: &[ShipmentField] = &[
    ShipmentField {
        name: "shipment_status",
        locators: &[
            Locator::class("p", "NewShipmentState_stateCompleteName__rKoqH"),
            Locator::class("div", "NewShipmentState_stateCalcelText__XDxWj"),
        ],
        set: set_status,
        default: leave_absent,
    },
    ShipmentField {
        name: "shipping_address",
        locators: &[Locator::class("span", "styles_textLarge__Vs7i4")],
        set: set_address,
        default: leave_absent,
    },
    ShipmentField {
        name: "shipping_cost",
        locators: &[Locator::data_qa(
            "user-shipment-total",
            "styles_detailsText__Pnv_4",
        )],
        set: set_shipping_cost,
        default: leave_absent,
    },
    ShipmentField {
        name: "bonuses",
        locators: &[
            Locator::data_qa("loyalty-accrual", "styles_textSmall__haByG"),
            Locator::data_qa("loyalty-accrual", "styles_textSmall__haByG").any_class(),
        ],
        set: set_bonuses,
        default: zero_bonuses,
    },
    ShipmentField {
        name: "assembly_and_delivery",
        locators: &[Locator::data_qa("user-shipment-cost", "styles_total__9uFoP")],
        set: set_assembly,
        default: zero_assembly,
    },
    ShipmentField {
        name: "discount",
        locators: &[Locator::data_qa(
            "user-shipment-product-discount",
            "styles_textPromo__StcD0",
        )],
        set: set_discount,
        default: zero_discount,
    },
    ShipmentField {
        name: "shipment_merchant",
        locators: &[Locator::class("div", "order-goods-list__good-merchant")],
        set: set_merchant,
        default: leave_absent,
    },
];

/// Shipment date text; resolved by a [`parse::DateCursor`] since the page
/// omits the year.
pub const SHIPMENT_DATE: Locator = Locator::class("p", "NewShipmentState_time__uJGKF");

/// One block per purchased item
pub const PRODUCT_ITEM: Locator = Locator::class("div", "styles_assemblyItemContent__o1cVR");

const PRODUCT_NAME: Locator = Locator::class("div", "styles_name__V0VHp");
const PRODUCT_QUANTITY: Locator = Locator::class("div", "styles_quantity__JZCXN");
const PRODUCT_PRICE: Locator = Locator::class("div", "styles_currentPrice__Z3Whh");
const PRODUCT_STATUS: Locator = Locator::class("div", "StatusBadge_md__U4hG8");

/// Container of the shipment links on the order history page
pub const SHIPMENT_LIST: Locator = Locator::class("div", "styles_list___dvv1");

fn leave_absent(_: &mut StagedShipment) {}

fn zero_bonuses(s: &mut StagedShipment) {
    s.bonuses = Some(0);
}

fn zero_assembly(s: &mut StagedShipment) {
    s.assembly_and_delivery = Some(0);
}

fn zero_discount(s: &mut StagedShipment) {
    s.discount = Some(0.0);
}

fn set_status(s: &mut StagedShipment, text: &str) -> Option<()> {
    s.shipment_status = Some(text.to_string());
    Some(())
}

fn set_address(s: &mut StagedShipment, text: &str) -> Option<()> {
    s.shipping_address = Some(text.to_string());
    Some(())
}

fn set_shipping_cost(s: &mut StagedShipment, text: &str) -> Option<()> {
    s.shipping_cost = Some(parse::money(text)?);
    Some(())
}

fn set_bonuses(s: &mut StagedShipment, text: &str) -> Option<()> {
    s.bonuses = Some(parse::bonuses(text)?);
    Some(())
}

fn set_assembly(s: &mut StagedShipment, text: &str) -> Option<()> {
    s.assembly_and_delivery = Some(parse::assembly_and_delivery(text)?);
    Some(())
}

fn set_discount(s: &mut StagedShipment, text: &str) -> Option<()> {
    s.discount = Some(parse::discount(text)?);
    Some(())
}

fn set_merchant(s: &mut StagedShipment, text: &str) -> Option<()> {
    s.shipment_merchant = Some(text.to_string());
    Some(())
}

/// Reads one item block. Missing pieces stay absent.
pub fn product_from_item(item_html: &str) -> StagedProduct {
    StagedProduct {
        product_name: html::select_text(item_html, &PRODUCT_NAME),
        quantity: html::select_text(item_html, &PRODUCT_QUANTITY),
        purchase_price: html::select_text(item_html, &PRODUCT_PRICE)
            .as_deref()
            .and_then(parse::money),
        purchase_status: html::select_text(item_html, &PRODUCT_STATUS),
    }
}

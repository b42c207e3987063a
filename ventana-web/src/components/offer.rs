use ventana_core::content::{call_to_action_label, features, offer_title};
use ventana_core::{Gender, Section, format_clock};
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct OfferProps {
    pub gender: Gender,
    pub remaining_secs: u64,
    pub on_buy: Callback<()>,
}

#[function_component(OfferSection)]
pub fn offer_section(props: &OfferProps) -> Html {
    let on_buy = {
        let cb = props.on_buy.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section id={Section::Offer.element_id()} class="revelation fade-in offer-section-custom">
            <div class="offer-badge">{ "OFERTA EXCLUSIVA" }</div>
            <h2 class="offer-title-main">{ offer_title(props.gender) }</h2>
            <ul class="offer-features">
                { for features(props.gender).into_iter().map(|feature| html! { <li>{ feature }</li> }) }
            </ul>
            <div class="price-box">
                <p class="price-old">{ "Precio regular: R$ 297" }</p>
                <p class="price-new">{ "R$ 97" }</p>
                <p class="price-discount">{ "💰 67% de descuento HOY" }</p>
            </div>
            <button type="button" class="cta-buy-final" onclick={on_buy}>
                { call_to_action_label(props.gender) }
            </button>
            <div class="trust-icons">
                <span>{ "🔒 Compra segura" }</span>
                <span>{ "✅ Acceso instantáneo" }</span>
                <span>{ "↩️ 30 días de garantía" }</span>
            </div>
            <div class="final-urgency-grid">
                <div class="urgency-item">
                    <span>{ "Tiempo restante:" }</span>
                    <strong>{ format_clock(props.remaining_secs) }</strong>
                </div>
            </div>
            <p class="guarantee-text">{ "Exclusivo para quien completó el análisis personalizado" }</p>
        </section>
    }
}

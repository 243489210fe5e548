use crate::domain::features::MemberFeatures;
use crate::domain::offer::{OfferAssignment, OfferRequest, PredictionResponse, ScorePair};
use crate::scoring::model;
use crate::scoring::offer_policy::assign_offer;
use axum::Json;

pub async fn predict_ats(Json(features): Json<MemberFeatures>) -> Json<PredictionResponse> {
    Json(PredictionResponse {
        prediction: model::predict_ats(&features),
    })
}

pub async fn predict_resp(Json(features): Json<MemberFeatures>) -> Json<PredictionResponse> {
    Json(PredictionResponse {
        prediction: model::predict_resp(&features),
    })
}

pub async fn assign(Json(req): Json<OfferRequest>) -> Json<OfferAssignment> {
    let offer = assign_offer(&ScorePair {
        ats: req.ats_prediction,
        resp: req.resp_prediction,
    });
    Json(OfferAssignment { offer })
}

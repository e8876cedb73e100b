//! Flights, premiums, oracle requests and payouts through the facade.

use flight_surety::blockchain::units::{ether, to_wei};
use flight_surety::contract::FlightStatus;
use flight_surety::FlightSuretyApi;

mod common;

const FLIGHT: &str = "ND1309";
const DEPARTURE: u64 = 1_700_000_000;

#[tokio::test]
async fn test_flight_registration_requires_funded_airline() {
    let (_, client) = common::deploy_with_funded_owner().await;
    let airline = client.airlines()[0];

    // Not registered yet
    assert!(client.register_flight(airline, FLIGHT, DEPARTURE).await.is_err());

    client
        .register_airline(client.owner(), airline, "Second Air")
        .await
        .unwrap();
    // Registered but unfunded
    assert!(client.register_flight(airline, FLIGHT, DEPARTURE).await.is_err());

    client.fund_airline(airline).await.unwrap();
    client.register_flight(airline, FLIGHT, DEPARTURE).await.unwrap();
    client.register_flight(airline, "ND1310", DEPARTURE).await.unwrap();
    assert_eq!(
        client.get_flights().await.unwrap(),
        vec![FLIGHT.to_string(), "ND1310".to_string()]
    );
}

#[tokio::test]
async fn test_premium_cap_enforced_by_contract() {
    let (_, client) = common::deploy_with_funded_owner().await;
    client.register_flight(client.owner(), FLIGHT, DEPARTURE).await.unwrap();
    let passenger = client.passengers()[0];

    // The facade converts without checking the cap
    let err = client.buy(passenger, FLIGHT, "1.5").await.unwrap_err();
    assert!(err.to_string().contains("buy failed"));

    client.buy(passenger, FLIGHT, "1").await.unwrap();
    assert!(client.buy(passenger, "UNKNOWN", "0.1").await.is_err());
    assert!(client.buy(passenger, FLIGHT, "a lot").await.is_err());
}

#[tokio::test]
async fn test_delayed_flight_pays_out_once() {
    let (contract, client) = common::deploy_with_funded_owner().await;
    client.register_flight(client.owner(), FLIGHT, DEPARTURE).await.unwrap();
    let passenger = client.passengers()[0];
    client.buy(passenger, FLIGHT, "1").await.unwrap();

    // No payout before the status is known
    assert!(client.pay_insurance(passenger, FLIGHT).await.is_err());

    let request = client.fetch_flight_status(FLIGHT).await.unwrap();
    assert_eq!(request.flight, FLIGHT);
    assert_eq!(request.airline, client.airlines()[0]);
    assert!(request.index.is_some());

    // The facade asks on behalf of the first airline account, which does
    // not operate this flight, so the status stays unknown
    contract
        .report_flight_status(request.airline, FLIGHT, request.timestamp, FlightStatus::LateAirline)
        .unwrap();
    assert_eq!(contract.flight_status(FLIGHT), Some(FlightStatus::Unknown));

    let request = contract
        .fetch_flight_status(client.owner(), client.owner(), FLIGHT, DEPARTURE)
        .await
        .unwrap();
    contract
        .report_flight_status(request.airline, FLIGHT, request.timestamp, FlightStatus::LateAirline)
        .unwrap();
    assert_eq!(contract.flight_status(FLIGHT), Some(FlightStatus::LateAirline));

    client.pay_insurance(passenger, FLIGHT).await.unwrap();
    assert_eq!(
        contract.balance_of(passenger),
        ether(100) + to_wei("0.5").unwrap()
    );
    assert!(client.pay_insurance(passenger, FLIGHT).await.is_err());
}

#[tokio::test]
async fn test_on_time_flight_does_not_pay() {
    let (contract, client) = common::deploy_with_funded_owner().await;
    let owner = client.owner();
    client.register_flight(owner, FLIGHT, DEPARTURE).await.unwrap();
    let passenger = client.passengers()[2];
    client.buy(passenger, FLIGHT, "0.25").await.unwrap();

    let request = contract
        .fetch_flight_status(owner, owner, FLIGHT, DEPARTURE)
        .await
        .unwrap();
    contract
        .report_flight_status(owner, FLIGHT, request.timestamp, FlightStatus::OnTime)
        .unwrap();

    let err = client.pay_insurance(passenger, FLIGHT).await.unwrap_err();
    assert!(err.to_string().contains("not delayed"));
    assert_eq!(
        contract.balance_of(passenger),
        ether(100) - to_wei("0.25").unwrap()
    );
}

#[tokio::test]
async fn test_not_operational_blocks_insurance() {
    let (_, client) = common::deploy_with_funded_owner().await;
    client.register_flight(client.owner(), FLIGHT, DEPARTURE).await.unwrap();
    client.set_operating_status(false).await.unwrap();

    let passenger = client.passengers()[0];
    assert!(client.buy(passenger, FLIGHT, "1").await.is_err());
    assert!(client.fetch_flight_status(FLIGHT).await.is_err());
    // Reads still work
    assert_eq!(client.get_flights().await.unwrap().len(), 1);
    assert_eq!(client.get_airline_funds(passenger).await.unwrap(), "0");
}

#[tokio::test]
async fn test_later_report_does_not_undo_a_delay() {
    let (contract, client) = common::deploy_with_funded_owner().await;
    let owner = client.owner();
    client.register_flight(owner, FLIGHT, DEPARTURE).await.unwrap();
    let passenger = client.passengers()[1];
    client.buy(passenger, FLIGHT, "1").await.unwrap();

    for status in [FlightStatus::LateAirline, FlightStatus::OnTime] {
        contract
            .fetch_flight_status(owner, owner, FLIGHT, DEPARTURE)
            .await
            .unwrap();
        contract
            .report_flight_status(owner, FLIGHT, DEPARTURE, status)
            .unwrap();
    }
    assert_eq!(contract.flight_status(FLIGHT), Some(FlightStatus::LateAirline));

    client.pay_insurance(passenger, FLIGHT).await.unwrap();
    assert_eq!(
        contract.balance_of(passenger),
        ether(100) + to_wei("0.5").unwrap()
    );
}

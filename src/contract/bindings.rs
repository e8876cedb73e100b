//! Static bindings for the deployed FlightSuretyApp contract.

use alloy::sol;

sol! {
    #[sol(rpc)]
    contract FlightSuretyApp {
        /// Emitted when a flight status is requested from the oracles.
        #[derive(Debug)]
        event OracleRequest(uint8 index, address airline, string flight, uint256 timestamp);

        function isOperational() external view returns (bool);
        function setOperatingStatus(bool mode) external;

        function isAirline(address airline) external view returns (bool);
        function isRegisteredAirline(address airline) external view returns (bool);
        function registerAirline(address airline, string name) external returns (bool success, uint256 votes);
        function fund() external payable;
        function getFunds(address airline) external view returns (uint256);

        function registerFlight(string flight, uint256 timestamp) external;
        function getFlights() external view returns (string[] memory);
        function fetchFlightStatus(address airline, string flight, uint256 timestamp) external;

        function buy(string flight) external payable;
        function payInsurance(string flight) external;
    }
}
